//! Logging setup for the bridge binaries.
//!
//! Console output goes to stderr so command output on stdout stays
//! pipeable. An optional log directory adds a daily-rolling file, written
//! through a non-blocking appender, as plain text or one JSON object per line.

use std::str::FromStr;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Format of the file layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?} (expected text or json)")),
        }
    }
}

/// `RUST_LOG` when set and valid, else `log_level`.
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Install the global subscriber.
///
/// - `log_level`: default directive when `RUST_LOG` is unset (e.g. `"info"`)
/// - `log_dir`: directory for daily-rolling files, `{module_name}.YYYY-MM-DD`
/// - `format`: file layer format; the console is always human-readable
///
/// Keep the returned guard alive for the life of the process so buffered
/// file output is flushed. A second call installs nothing.
pub fn init_logging(
    log_level: &str,
    log_dir: Option<&str>,
    module_name: &str,
    format: LogFormat,
) -> Option<WorkerGuard> {
    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, module_name));
            let base = fmt::layer().with_writer(writer).with_ansi(false).with_target(true);
            let layer = match format {
                LogFormat::Text => base.boxed(),
                LogFormat::Json => base.json().boxed(),
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(console_layer)
        .with(file_layer)
        .try_init();
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn second_init_is_harmless() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().to_str().unwrap();
        let _first = init_logging("debug", Some(dir), "ftb-test", LogFormat::Json);
        let _second = init_logging("info", None, "ftb-test", LogFormat::Text);
        tracing::info!("still logging");
    }
}
