//! Logging infrastructure for Folio.
//!
//! `RUST_LOG` wins when set; otherwise the folio crates log at the configured
//! level and everything else at `warn`.

use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const FOLIO_TARGETS: [&str; 4] = ["folio_core", "folio_api", "folio_observability", "folio"];

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for the folio crates.
    pub level: Level,
    pub format: LogFormat,
    /// Whether to emit span open/close events.
    pub include_spans: bool,
    /// Whether to include file/line info.
    pub include_location: bool,
    /// Whether to include target (module path).
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Text,
            include_spans: false,
            include_location: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Verbose text output for local work.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Text,
            include_spans: true,
            include_location: true,
            include_target: true,
        }
    }

    /// JSON output for log aggregation.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Json,
            include_spans: false,
            include_location: false,
            include_target: true,
        }
    }

    /// Builds a configuration from `LOG_LEVEL` / `LOG_FORMAT` style values.
    ///
    /// Unset values fall back to the defaults.
    pub fn from_values(level: Option<&str>, format: Option<&str>) -> Result<Self, String> {
        let mut config = match format {
            Some(f) => match f.parse::<LogFormat>()? {
                LogFormat::Json => Self::production(),
                LogFormat::Text => Self::default(),
            },
            None => Self::default(),
        };

        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            config.level = level
                .trim()
                .parse()
                .map_err(|_| format!("unknown log level '{}'", level))?;
        }

        Ok(config)
    }

    fn default_directives(&self) -> String {
        let level = self.level.to_string().to_lowercase();
        let mut directives = vec!["warn".to_string()];
        directives.extend(FOLIO_TARGETS.iter().map(|t| format!("{}={}", t, level)));
        directives.push(format!("tower_http={}", level));
        directives.join(",")
    }
}

/// Initializes the logging system with the given configuration.
pub fn init_logging_with_config(config: LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    match config.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_span_events(span_events)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Text => {
            let fmt_layer = fmt::layer()
                .with_span_events(span_events)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .init();
        }
    }
}
