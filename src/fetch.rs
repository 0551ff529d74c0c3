use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::dates::parse_iso_date;
use crate::matches::MatchesPayload;

const TODAY_PATH: &str = "/api/matches/today";
const DATE_PATH: &str = "/api/matches/date";
const MAX_DETAIL_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {code} • {detail}")]
    Status { code: u16, detail: String },

    #[error("invalid json: {0}")]
    Json(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchesRequest {
    Today,
    Date(String),
}

impl MatchesRequest {
    pub fn url(&self, base: &str) -> Result<Url, FetchError> {
        match self {
            MatchesRequest::Today => parse_url(&format!("{base}{TODAY_PATH}")),
            MatchesRequest::Date(date) => {
                let date = date.trim();
                if parse_iso_date(date).is_none() {
                    return Err(FetchError::InvalidDate(date.to_string()));
                }
                let mut url = parse_url(&format!("{base}{DATE_PATH}"))?;
                url.query_pairs_mut().append_pair("d", date);
                Ok(url)
            }
        }
    }

    /// Status text shown while the request is in flight.
    pub fn loading_status(&self) -> String {
        match self {
            MatchesRequest::Today => "loading today…".to_string(),
            MatchesRequest::Date(date) => format!("loading {}…", date.trim()),
        }
    }
}

pub fn fetch_matches(
    client: &Client,
    base: &str,
    request: &MatchesRequest,
) -> Result<MatchesPayload, FetchError> {
    let url = request.url(base)?;
    fetch_json(client, &url)
}

/// GET `url` as JSON. Any non-2xx status is an error carrying the code and the
/// response body (or the url when the body is empty or unreadable).
pub fn fetch_json<T: DeserializeOwned>(client: &Client, url: &Url) -> Result<T, FetchError> {
    let resp = client
        .get(url.clone())
        .header(ACCEPT, "application/json")
        .send()
        .map_err(FetchError::Transport)?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(status_error(status.as_u16(), &body, url.as_str()));
    }

    let body = resp.text().map_err(FetchError::Transport)?;
    serde_json::from_str(&body).map_err(FetchError::Json)
}

pub fn status_error(code: u16, body: &str, url: &str) -> FetchError {
    let body = body.trim();
    let detail = if body.is_empty() {
        url.to_string()
    } else {
        truncate_chars(body, MAX_DETAIL_CHARS)
    };
    FetchError::Status { code, detail }
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|err| FetchError::InvalidUrl(format!("{raw} ({err})")))
}

fn truncate_chars(raw: &str, max: usize) -> String {
    match raw.char_indices().nth(max) {
        Some((idx, _)) => raw[..idx].to_string(),
        None => raw.to_string(),
    }
}
