use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local};
use reqwest::blocking::Client;

use crate::dates::format_local_date;
use crate::fetch::{MatchesRequest, fetch_matches};
use crate::http_client::http_client;
use crate::render::render_matches;
use crate::state::{Delta, ProviderCommand};

/// Start the request worker. It runs one command at a time and exits once every
/// command sender is dropped.
pub fn spawn_provider(
    api_base: String,
    timeout: Duration,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let client = match http_client(timeout) {
            Ok(client) => Some(client),
            Err(err) => {
                let _ = tx.send(Delta::Log(format!("[ERROR] {err:#}")));
                None
            }
        };
        let _ = tx.send(Delta::Log(format!("[INFO] API base {api_base}")));

        for cmd in cmd_rx {
            match cmd {
                ProviderCommand::FetchMatches(request) => {
                    let delta = match client {
                        Some(client) => run_request(client, &api_base, request, Local::now()),
                        None => Delta::FetchFailed {
                            request,
                            message: "http client unavailable".to_string(),
                        },
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    })
}

/// Fetch and render one request. Failures of any kind come back as `FetchFailed`.
pub fn run_request(
    client: &Client,
    api_base: &str,
    request: MatchesRequest,
    now: DateTime<Local>,
) -> Delta {
    match fetch_matches(client, api_base, &request) {
        Ok(payload) => {
            let today = format_local_date(&now);
            let rendered = render_matches(&payload, &today, now);
            Delta::SetMatches { request, rendered }
        }
        Err(err) => Delta::FetchFailed {
            request,
            message: err.to_string(),
        },
    }
}
