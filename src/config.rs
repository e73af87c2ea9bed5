//! Runtime settings read from the environment.
//!
//! A `.env` file in the working directory is loaded first, so either source
//! works:
//! ```text
//! TLC_BASE_URL=https://github.com/DataTalksClub/nyc-tlc-data/releases/download
//! LOG_FILE_PATH=logs/tlc_tripstats.log
//! ```

use crate::dataset::DEFAULT_BASE_URL;

pub const DEFAULT_LOG_FILE_PATH: &str = "logs/tlc_tripstats.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Archive root that partition URLs are built under.
    pub base_url: String,
    /// Daily-rolled JSON log file.
    pub log_file_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_file_path: DEFAULT_LOG_FILE_PATH.to_string(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable lookup. Unset or blank values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            base_url: get("TLC_BASE_URL", DEFAULT_BASE_URL),
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE_PATH),
        }
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }
}
