//! Structured logging setup.
//!
//! Installs a global `tracing-subscriber` fmt subscriber built from
//! [`LoggingConfig`]. `RUST_LOG`, when set, overrides the configured level.

use crate::config::{LoggingConfig, PROTOCOL_NAME};
use crate::error::{constants, ProtocolError, Result};
use tracing::{info, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

/// Filter for the configured level alone
pub fn level_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(config.log_level.as_str().to_ascii_lowercase())
        .map_err(|e| ProtocolError::LoggingError(format!("{}: {e}", constants::ERR_LOG_FILTER)))
}

/// Build the filter for `config`, preferring `RUST_LOG` when present
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => level_filter(config),
    }
}

/// Plain or JSON fmt subscriber writing to `writer`
fn build_subscriber<W>(config: &LoggingConfig, filter: EnvFilter, writer: W) -> BoxedSubscriber
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer);

    if config.json_format {
        Box::new(builder.json().finish())
    } else {
        Box::new(builder.finish())
    }
}

/// First event of a process, naming the application
fn announce(config: &LoggingConfig) {
    info!(app = %config.app_name, protocol = PROTOCOL_NAME, "Logging initialized");
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when console logging is disabled or a subscriber is
/// already installed, so repeated calls are harmless.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    if !config.log_to_console {
        return Ok(false);
    }

    let subscriber = build_subscriber(config, env_filter(config)?, std::io::stdout);
    let installed = tracing::subscriber::set_global_default(subscriber).is_ok();
    if installed {
        announce(config);
    }

    Ok(installed)
}


#[cfg(test)]
pub(crate) use self::capture::Captured;

/// Subscriber at `level` writing into `out`, for tests elsewhere in the crate
#[cfg(test)]
pub(crate) fn capturing_subscriber(level: &str, out: &Captured) -> BoxedSubscriber {
    build_subscriber(
        &LoggingConfig::default(),
        EnvFilter::new(level),
        out.clone(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        let _ = init(&config).unwrap();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_disabled_console_installs_nothing() {
        let config = LoggingConfig {
            log_to_console: false,
            ..LoggingConfig::default()
        };
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_level_filter_follows_config() {
        let config = LoggingConfig {
            log_level: Level::DEBUG,
            ..LoggingConfig::default()
        };
        let filter = level_filter(&config).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_json_format_writes_json_lines() {
        let config = LoggingConfig {
            json_format: true,
            ..LoggingConfig::default()
        };
        let out = Captured::default();
        let subscriber = build_subscriber(&config, level_filter(&config).unwrap(), out.clone());

        tracing::subscriber::with_default(subscriber, || info!(answer = 42, "json line"));

        let text = out.contents();
        let line = text.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["fields"]["message"], "json line");
        assert_eq!(value["fields"]["answer"], 42);
    }

    #[test]
    fn test_announce_names_app_and_protocol() {
        let config = LoggingConfig {
            app_name: String::from("lab1-checker"),
            ..LoggingConfig::default()
        };
        let out = Captured::default();
        let subscriber = build_subscriber(&config, level_filter(&config).unwrap(), out.clone());

        tracing::subscriber::with_default(subscriber, || announce(&config));

        let text = out.contents();
        assert!(text.contains("Logging initialized"), "{text}");
        assert!(text.contains("lab1-checker"), "{text}");
        assert!(text.contains(PROTOCOL_NAME), "{text}");
    }
}
