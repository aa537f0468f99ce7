use chrono::FixedOffset;
use prodline_core::analytics::assembler::ReportSettings;
use prodline_core::analytics::window::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Window length in days when a report request omits `from` (default: `30`).
    pub report_default_window_days: i64,
    /// Plant wall-clock offset (default: `+00:00`).
    pub report_utc_offset: FixedOffset,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `3000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `REPORT_DEFAULT_WINDOW_DAYS` | `30`                    |
    /// | `REPORT_UTC_OFFSET`          | `+00:00`                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let report_default_window_days = parse_window_days(
            &std::env::var("REPORT_DEFAULT_WINDOW_DAYS")
                .unwrap_or_else(|_| DEFAULT_WINDOW_DAYS.to_string()),
        )
        .expect("REPORT_DEFAULT_WINDOW_DAYS must be an integer between 1 and 36600");

        let report_utc_offset: FixedOffset = std::env::var("REPORT_UTC_OFFSET")
            .unwrap_or_else(|_| "+00:00".into())
            .parse()
            .expect("REPORT_UTC_OFFSET must look like +HH:MM or -HH:MM");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            report_default_window_days,
            report_utc_offset,
        }
    }

    /// Report run knobs derived from this configuration.
    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            default_window_days: self.report_default_window_days,
            utc_offset: self.report_utc_offset,
        }
    }
}

fn parse_window_days(raw: &str) -> Option<i64> {
    raw.trim()
        .parse()
        .ok()
        .filter(|days| (1..=MAX_WINDOW_DAYS).contains(days))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
