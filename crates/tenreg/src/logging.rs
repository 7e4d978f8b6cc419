//! Structured logging setup for applications embedding the fitter
//!
//! The library crates only emit `tracing` events; nothing is printed until a
//! subscriber is installed. [`init_tracing`] installs one from a
//! [`TracingConfig`].
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directive (default `tenreg_fit=info,warn`)
//! - `TENREG_LOG_FORMAT`: `pretty`, `compact` or `json` (default `pretty`)
//!
//! # Example
//!
//! ```no_run
//! use tenreg::logging::{init_tracing, TracingConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_tracing(TracingConfig::default())?;
//!     Ok(())
//! }
//! ```
//!
//! Events emitted by a fit:
//!
//! | level | message                                   | fields                        |
//! |-------|-------------------------------------------|-------------------------------|
//! | span  | `low_rank_fit`                            | rank, lambda, samples         |
//! | debug | `regularized operators ready`             | input_dim, output_dim         |
//! | debug | `sweep complete`                          | step, error                   |
//! | info  | `converged`                               | iters, error                  |
//! | warn  | `iteration cap reached without convergence` | iters, error, delta         |

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable selecting the output format
pub const FORMAT_ENV: &str = "TENREG_LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "tenreg_fit=info,warn";

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingFormat {
    /// Multi-line human-readable output
    #[default]
    Pretty,
    /// Single line per event
    Compact,
    /// JSON lines
    Json,
}

impl TracingFormat {
    /// Parse a format name; unknown names fall back to `Pretty`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => TracingFormat::Json,
            "compact" => TracingFormat::Compact,
            _ => TracingFormat::Pretty,
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub format: TracingFormat,
    /// Filter directive (e.g. `tenreg_fit=debug`)
    pub filter: String,
    pub with_ansi: bool,
    pub with_target: bool,
    pub with_file: bool,
    pub with_line_number: bool,
}

impl TracingConfig {
    /// Build from raw `TENREG_LOG_FORMAT` / `RUST_LOG` values
    pub fn from_vars(format: Option<&str>, filter: Option<&str>) -> Self {
        Self {
            format: format.map(TracingFormat::parse).unwrap_or_default(),
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(DEFAULT_FILTER)
                .to_string(),
            with_ansi: true,
            with_target: true,
            with_file: false,
            with_line_number: false,
        }
    }

    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        let format = std::env::var(FORMAT_ENV).ok();
        let filter = std::env::var("RUST_LOG").ok();
        Self::from_vars(format.as_deref(), filter.as_deref())
    }
}

/// Install a global subscriber for `config`
///
/// Call once at startup. Fails if the filter does not parse or a global
/// subscriber is already set.
pub fn init_tracing(config: TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)?;

    match config.format {
        TracingFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_file(config.with_file)
                .with_line_number(config.with_line_number)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
        TracingFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_file(config.with_file)
                .with_line_number(config.with_line_number)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
        TracingFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(config.with_target)
                .with_file(config.with_file)
                .with_line_number(config.with_line_number)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        }
    }

    tracing::debug!(format = ?config.format, filter = %config.filter, "tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(TracingFormat::parse("json"), TracingFormat::Json);
        assert_eq!(TracingFormat::parse(" JSON "), TracingFormat::Json);
        assert_eq!(TracingFormat::parse("compact"), TracingFormat::Compact);
        assert_eq!(TracingFormat::parse("pretty"), TracingFormat::Pretty);
        assert_eq!(TracingFormat::parse("xml"), TracingFormat::Pretty);
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = TracingConfig::from_vars(None, None);
        assert_eq!(config.format, TracingFormat::Pretty);
        assert_eq!(config.filter, DEFAULT_FILTER);

        let blank = TracingConfig::from_vars(None, Some("  "));
        assert_eq!(blank.filter, DEFAULT_FILTER);
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = TracingConfig::from_vars(Some("json"), Some("tenreg_fit=debug"));
        assert_eq!(config.format, TracingFormat::Json);
        assert_eq!(config.filter, "tenreg_fit=debug");
    }

    #[test]
    fn test_builders() {
        let config = TracingConfig::from_vars(None, None)
            .with_format(TracingFormat::Compact)
            .with_filter("trace");
        assert_eq!(config.format, TracingFormat::Compact);
        assert_eq!(config.filter, "trace");
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let config = TracingConfig::from_vars(None, Some("tenreg_fit=notalevel"));
        assert!(init_tracing(config).is_err());
    }
}
