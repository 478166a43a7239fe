use sitepulse_core::session::DEFAULT_BUDGET;

/// Which dashboard the shared core renders.
///
/// The original product shipped three near-duplicate dashboards; here they
/// collapse into one server with the view selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Timeline and spend charts over one calendar month.
    Month,
    /// Budget pie and completion tracking per project.
    Project,
}

impl ViewMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "month" => Some(Self::Month),
            "project" => Some(Self::Project),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Project => "project",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development; in production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown drain timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Dashboard view mode (default: `month`).
    pub view_mode: ViewMode,
    /// Google Sheet URL. Unset means the in-memory demo store.
    pub sheet_url: Option<String>,
    /// Sample CSV path for the demo store (default: `sample_data.csv`).
    pub sample_data_path: String,
    /// Budget used when a session has not set one.
    pub default_budget: f64,
    /// Read-cache TTL in seconds (default: `300`).
    pub cache_ttl_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `VIEW_MODE`             | `month`                 |
    /// | `SHEET_URL`             | unset                   |
    /// | `SAMPLE_DATA_PATH`      | `sample_data.csv`       |
    /// | `DEFAULT_BUDGET`        | `1000000`               |
    /// | `CACHE_TTL_SECS`        | `300`                   |
    ///
    /// Malformed numeric values fail fast: a server that cannot read its
    /// configuration should not come up.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let view_mode = std::env::var("VIEW_MODE")
            .map(|raw| {
                ViewMode::parse(&raw)
                    .unwrap_or_else(|| panic!("VIEW_MODE must be 'month' or 'project', got '{raw}'"))
            })
            .unwrap_or(ViewMode::Month);

        let sheet_url = std::env::var("SHEET_URL").ok().filter(|s| !s.is_empty());

        let sample_data_path =
            std::env::var("SAMPLE_DATA_PATH").unwrap_or_else(|_| "sample_data.csv".into());

        let default_budget: f64 = std::env::var("DEFAULT_BUDGET")
            .map(|raw| raw.parse().expect("DEFAULT_BUDGET must be a number"))
            .unwrap_or(DEFAULT_BUDGET);

        let cache_ttl_secs: u64 = std::env::var("CACHE_TTL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("CACHE_TTL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            view_mode,
            sheet_url,
            sample_data_path,
            default_budget,
            cache_ttl_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_parses_known_values_only() {
        assert_eq!(ViewMode::parse("month"), Some(ViewMode::Month));
        assert_eq!(ViewMode::parse("project"), Some(ViewMode::Project));
        assert_eq!(ViewMode::parse("weekly"), None);
    }
}
