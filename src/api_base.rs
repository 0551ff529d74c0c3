use reqwest::Url;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

// Port a static-file dev server usually runs on; the backend sits on 8000 next to it.
const DEV_STATIC_PORT: u16 = 5500;

/// Resolve the API origin from the URL the viewer was opened from.
///
/// A page served from port 5500 is assumed to be the local static server, so the
/// local backend is used. Anything else talks to its own origin.
pub fn resolve_api_base(page_url: &str) -> String {
    let Ok(url) = Url::parse(page_url.trim()) else {
        return DEFAULT_API_BASE.to_string();
    };
    if url.port() == Some(DEV_STATIC_PORT) {
        return DEFAULT_API_BASE.to_string();
    }
    let Some(host) = url.host_str() else {
        return DEFAULT_API_BASE.to_string();
    };
    match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    }
}

/// Explicit base wins over the page-URL guess; the default is used when neither is set.
pub fn choose_api_base(explicit: Option<&str>, page_url: Option<&str>) -> String {
    if let Some(base) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return base.trim_end_matches('/').to_string();
    }
    match page_url.map(str::trim).filter(|s| !s.is_empty()) {
        Some(page) => resolve_api_base(page),
        None => DEFAULT_API_BASE.to_string(),
    }
}
