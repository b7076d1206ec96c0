// This is free and unencumbered software released into the public domain.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Copy, Clone, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct EditConfig {
    pub log_level: &'static str,
    pub format: OutputFormat,
    pub dot: bool,
}

impl EditConfig {
    pub fn new(debug: bool, verbose: bool, format: OutputFormat, dot: bool) -> Self {
        // `--debug` shows every edge change the ledger records
        let log_level = match (debug, verbose) {
            (true, _) => "trace",
            (false, true) => "info",
            (false, false) => "warn",
        };
        EditConfig {
            log_level,
            format,
            dot,
        }
    }

    /// Logs go to stderr; `RUST_LOG` overrides the level picked from the flags.
    pub fn init_tracing(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(EditConfig::new(false, false, OutputFormat::Text, false).log_level, "warn");
        assert_eq!(EditConfig::new(false, true, OutputFormat::Text, false).log_level, "info");
        assert_eq!(EditConfig::new(true, true, OutputFormat::Json, true).log_level, "trace");
    }
}
