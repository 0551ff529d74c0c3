use std::env;
use std::time::Duration;

use crate::api_base::choose_api_base;
use crate::dates::{parse_iso_date, today_local};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub api_base: String,
    pub timeout: Duration,
    pub initial_date: String,
}

impl ViewerConfig {
    /// Read once at startup. Call `load_dotenv` first if `.env` files should apply.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same rules as `from_env`, reading variables through `lookup`.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let opt = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        let explicit = opt("MATCHES_API_BASE");
        let page_url = opt("MATCHES_PAGE_URL");
        let api_base = choose_api_base(explicit.as_deref(), page_url.as_deref());

        let timeout_secs = opt("MATCHES_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);

        let initial_date = opt("MATCHES_DATE")
            .filter(|raw| parse_iso_date(raw).is_some())
            .map(|raw| raw.trim().to_string())
            .unwrap_or_else(today_local);

        Self {
            api_base,
            timeout: Duration::from_secs(timeout_secs),
            initial_date,
        }
    }
}

pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}
