use crate::{env_optional, env_or_default, ConfigError, Environment, FromEnv};
use tracing::{warn, Dispatch};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{prelude::*, EnvFilter, Layer, Registry};

/// Logger settings
///
/// - `LOG_LEVEL`: default filter directive when `RUST_LOG` is unset (default: "info")
/// - `LOG_TIME_FORMAT`: strftime pattern for event timestamps, e.g. `%Y-%m-%dT%H:%M:%S%.3fZ`
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub time_format: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            time_format: None,
        }
    }
}

impl FromEnv for LogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            level: env_or_default("LOG_LEVEL", "info"),
            time_format: env_optional("LOG_TIME_FORMAT"),
        })
    }
}

/// Install color-eyre with a project-standard configuration.
///
/// Call this early in the main() before any fallible operations to ensure
/// colored error output. Safe to call multiple times.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Build the application logger without installing it globally.
///
/// The returned [`Dispatch`] is handed to whoever needs to log: `main` scopes
/// it with `tracing::dispatcher::set_default`, and the gRPC and HTTP request
/// loggers run every request future under it.
///
/// - **Production** (`APP_ENV=production`): JSON lines, module targets hidden
/// - **Development** (default): pretty-printed, human-readable
///
/// Both include an `ErrorLayer` so `eyre` reports carry span traces.
/// `RUST_LOG` overrides `LogConfig::level` when set.
pub fn build_dispatch(environment: &Environment, config: &LogConfig) -> Dispatch {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if environment.is_production() {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true);
        match &config.time_format {
            Some(format) => layer.with_timer(ChronoUtc::new(format.clone())).boxed(),
            None => layer.boxed(),
        }
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .pretty();
        match &config.time_format {
            Some(format) => layer.with_timer(ChronoUtc::new(format.clone())).boxed(),
            None => layer.boxed(),
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .with(filter);
    let dispatch = Dispatch::new(subscriber);

    if config.time_format.is_none() {
        tracing::dispatcher::with_default(&dispatch, || {
            warn!("LOG_TIME_FORMAT is not set, falling back to the default timestamp format");
        });
    }

    dispatch
}
