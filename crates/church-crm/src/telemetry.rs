use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Failure to set up logging for the rating service.
#[derive(Debug)]
pub enum TelemetryError {
    /// `APP_LOG_LEVEL` holds a directive `EnvFilter` cannot parse.
    InvalidDirective { directive: String, source: ParseError },
    /// A global subscriber was already installed.
    SubscriberInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidDirective { directive, .. } => {
                write!(f, "APP_LOG_LEVEL directive '{directive}' is not a valid log filter")
            }
            TelemetryError::SubscriberInstalled(err) => {
                write!(f, "could not install the rating service log subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidDirective { source, .. } => Some(source),
            TelemetryError::SubscriberInstalled(err) => Some(&**err),
        }
    }
}

/// Builds the filter from `RUST_LOG` when set, falling back to the configured level.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            EnvFilter::try_new(&config.log_level).map_err(|source| {
                TelemetryError::InvalidDirective {
                    directive: config.log_level.clone(),
                    source,
                }
            })
        }
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = env_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::SubscriberInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_directive_reports_the_offending_value() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }

        let config = TelemetryConfig {
            log_level: "church_crm=notalevel".to_string(),
        };

        match env_filter(&config) {
            Err(err @ TelemetryError::InvalidDirective { .. }) => {
                assert!(err.to_string().contains("church_crm=notalevel"));
                assert!(err.to_string().starts_with("APP_LOG_LEVEL"));
            }
            other => panic!("expected env filter error, got {other:?}"),
        }
    }
}
