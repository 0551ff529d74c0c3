use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

const USER_AGENT: &str = concat!("matchday_terminal/", env!("CARGO_PKG_VERSION"));

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared client. The timeout of the first caller sticks for the life of the process.
pub fn http_client(timeout: Duration) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| build_client(timeout))
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build http client")
}
