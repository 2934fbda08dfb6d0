use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

/// Initialize structured logging based on configuration
///
/// Supports both JSON (production) and pretty (development) formats
/// with configurable log levels and optional file output. `debug` forces
/// the level to debug regardless of `config.level`; `RUST_LOG` still wins.
pub fn init_logging(config: &LoggingConfig, debug: bool) -> anyhow::Result<()> {
    let level = effective_level(config, debug);
    let log_level = parse_log_level(level)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let writer = make_writer(config.file_path.as_deref())?;

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.format.as_str() == "json" {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_line_number(true)
            .with_file(false)
            .with_writer(writer)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

/// Level string to filter on, `debug` when the override is set
fn effective_level(config: &LoggingConfig, debug: bool) -> &str {
    if debug {
        "debug"
    } else {
        config.level.as_str()
    }
}

/// Append to `file_path` when set, stdout otherwise
fn make_writer(file_path: Option<&str>) -> std::io::Result<BoxMakeWriter> {
    match file_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            Ok(BoxMakeWriter::new(Arc::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stdout)),
    }
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> anyhow::Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(anyhow::anyhow!("Invalid log level: {level}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert!(parse_log_level("trace").is_ok());
        assert!(parse_log_level("DEBUG").is_ok());
        assert!(parse_log_level("info").is_ok());
        assert!(parse_log_level("warning").is_ok());
        assert!(parse_log_level("error").is_ok());
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_debug_override_level() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        };
        assert_eq!(effective_level(&config, false), "warn");
        assert_eq!(effective_level(&config, true), "debug");
    }

    #[test]
    fn test_file_writer_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tvhook.log");
        std::fs::write(&path, "first\n").unwrap();

        make_writer(path.to_str()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");

        let fresh = dir.path().join("fresh.log");
        make_writer(fresh.to_str()).unwrap();
        assert!(fresh.exists());

        assert!(make_writer(None).is_ok());
        assert!(make_writer(dir.path().join("missing/dir.log").to_str()).is_err());
    }

    #[test]
    fn test_invalid_level_rejected_before_install() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(init_logging(&config, false).is_err());
    }
}
