use std::collections::VecDeque;

use crate::dates::shift_date;
use crate::fetch::MatchesRequest;
use crate::render::{RenderedMatches, error_status};

const MAX_LOGS: usize = 200;
const DATE_INPUT_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct AppState {
    pub api_base: String,
    pub date_input: String,
    pub status: String,
    pub list: Vec<String>,
    /// Both fetch triggers are disabled while a request is in flight.
    pub busy: bool,
    pub pending: Option<MatchesRequest>,
    pub shown_date: Option<String>,
    pub list_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    SetMatches {
        request: MatchesRequest,
        rendered: RenderedMatches,
    },
    FetchFailed {
        request: MatchesRequest,
        message: String,
    },
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    FetchMatches(MatchesRequest),
}

impl AppState {
    pub fn new(api_base: impl Into<String>, initial_date: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            date_input: initial_date.into(),
            status: String::new(),
            list: Vec::with_capacity(32),
            busy: false,
            pending: None,
            shown_date: None,
            list_scroll: 0,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn triggers_enabled(&self) -> bool {
        !self.busy
    }

    /// "Today" trigger. Returns the command to hand to the provider, or `None`
    /// while the triggers are disabled.
    pub fn request_today(&mut self) -> Option<ProviderCommand> {
        self.begin_request(MatchesRequest::Today)
    }

    /// "Load" trigger for whatever is in the date input.
    pub fn request_date(&mut self) -> Option<ProviderCommand> {
        let date = self.date_input.trim().to_string();
        self.begin_request(MatchesRequest::Date(date))
    }

    fn begin_request(&mut self, request: MatchesRequest) -> Option<ProviderCommand> {
        if self.busy {
            self.push_log("[WARN] Request already in flight");
            return None;
        }
        self.busy = true;
        self.status = request.loading_status();
        self.pending = Some(request.clone());
        Some(ProviderCommand::FetchMatches(request))
    }

    /// The provider could not be reached; treat it like a failed fetch.
    pub fn abort_request(&mut self, message: &str) {
        let request = self.pending.clone().unwrap_or(MatchesRequest::Today);
        apply_delta(
            self,
            Delta::FetchFailed {
                request,
                message: message.to_string(),
            },
        );
    }

    pub fn push_date_char(&mut self, c: char) {
        if (c.is_ascii_digit() || c == '-') && self.date_input.len() < DATE_INPUT_LEN {
            self.date_input.push(c);
        }
    }

    pub fn pop_date_char(&mut self) {
        self.date_input.pop();
    }

    pub fn shift_date_input(&mut self, days: i64) {
        match shift_date(&self.date_input, days) {
            Some(next) => self.date_input = next,
            None => self.push_log(format!("[WARN] Not a date: {}", self.date_input)),
        }
    }

    pub fn scroll_down(&mut self) {
        let max = u16::try_from(self.list.len().saturating_sub(1)).unwrap_or(u16::MAX);
        self.list_scroll = self.list_scroll.saturating_add(1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.list_scroll = self.list_scroll.saturating_sub(1);
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetMatches { request, rendered } => {
            state.push_log(format!(
                "[INFO] {}: {} matches for {}",
                request_label(&request),
                rendered.count,
                rendered.date
            ));
            state.status = rendered.status;
            state.list = rendered.lines;
            state.shown_date = Some(rendered.date);
            state.list_scroll = 0;
            finish_request(state);
        }
        Delta::FetchFailed { request, message } => {
            state.push_log(format!("[ERROR] {}: {message}", request_label(&request)));
            state.status = error_status(&message);
            state.list.clear();
            state.shown_date = None;
            state.list_scroll = 0;
            finish_request(state);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

fn finish_request(state: &mut AppState) {
    state.busy = false;
    state.pending = None;
}

fn request_label(request: &MatchesRequest) -> String {
    match request {
        MatchesRequest::Today => "today".to_string(),
        MatchesRequest::Date(date) => format!("date {date}"),
    }
}
