use chrono::{DateTime, Local};

use crate::dates::format_display_time;
use crate::matches::{Kickoff, MatchRow, MatchesPayload};

pub const EMPTY_MESSAGE: &str = "No matches for this date.";
const INVALID_TIME: &str = "Invalid Date";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMatches {
    pub date: String,
    pub count: usize,
    pub status: String,
    pub lines: Vec<String>,
}

/// Turn a payload into the status line plus one display line per match, in input order.
pub fn render_matches(
    payload: &MatchesPayload,
    today: &str,
    now: DateTime<Local>,
) -> RenderedMatches {
    let date = payload.date().unwrap_or(today).to_string();
    let matches = payload.matches();
    let count = matches.len();

    let lines = if matches.is_empty() {
        vec![EMPTY_MESSAGE.to_string()]
    } else {
        matches
            .iter()
            .map(|m| format_match_line(&m.normalize(now)))
            .collect()
    };

    RenderedMatches {
        status: status_line(&date, count),
        date,
        count,
        lines,
    }
}

pub fn status_line(date: &str, count: usize) -> String {
    format!("date: {date} • matches: {count}")
}

pub fn error_status(message: &str) -> String {
    format!("error: {message}")
}

pub fn format_match_line(row: &MatchRow) -> String {
    let time = match &row.kickoff {
        Kickoff::At(at) => format_display_time(at),
        Kickoff::Invalid => INVALID_TIME.to_string(),
    };
    format!("[{}] {} {} {} — {}", row.league, row.home, row.score, row.away, time)
}
