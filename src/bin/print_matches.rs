use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;

use matchday_terminal::config::{load_dotenv, ViewerConfig};
use matchday_terminal::feed::run_request;
use matchday_terminal::http_client::build_client;
use matchday_terminal::state::{apply_delta, AppState, Delta, ProviderCommand};

// Usage: print_matches [YYYY-MM-DD]
fn main() -> anyhow::Result<ExitCode> {
    load_dotenv();
    let config = ViewerConfig::from_env();
    let client = build_client(config.timeout).context("http client")?;

    let mut state = AppState::new(config.api_base.clone(), config.initial_date.clone());
    let cmd = match std::env::args().nth(1) {
        Some(date) => {
            state.date_input = date;
            state.request_date()
        }
        None => state.request_today(),
    };
    let Some(ProviderCommand::FetchMatches(request)) = cmd else {
        anyhow::bail!("no request issued");
    };

    let delta = run_request(&client, &config.api_base, request, Local::now());
    let failed = matches!(delta, Delta::FetchFailed { .. });
    apply_delta(&mut state, delta);

    println!("{}", state.status);
    if failed {
        if let Some(line) = state.logs.back() {
            eprintln!("{line}");
        }
        return Ok(ExitCode::FAILURE);
    }
    for line in &state.list {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}
