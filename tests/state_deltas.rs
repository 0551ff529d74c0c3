use matchday_terminal::fetch::MatchesRequest;
use matchday_terminal::render::{EMPTY_MESSAGE, RenderedMatches};
use matchday_terminal::state::{AppState, Delta, ProviderCommand, apply_delta};

fn state() -> AppState {
    AppState::new("http://127.0.0.1:8000", "2024-05-01")
}

fn rendered(date: &str, lines: &[&str]) -> RenderedMatches {
    RenderedMatches {
        date: date.to_string(),
        count: lines.len(),
        status: format!("date: {date} • matches: {}", lines.len()),
        lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

#[test]
fn today_trigger_disables_both_triggers_until_done() {
    let mut state = state();
    let cmd = state.request_today();
    assert_eq!(cmd, Some(ProviderCommand::FetchMatches(MatchesRequest::Today)));
    assert!(state.busy);
    assert!(!state.triggers_enabled());
    assert_eq!(state.status, "loading today…");

    // Neither trigger fires while a request is pending.
    assert_eq!(state.request_date(), None);
    assert_eq!(state.request_today(), None);
    assert!(state.logs.iter().any(|l| l.starts_with("[WARN]")));

    apply_delta(
        &mut state,
        Delta::SetMatches {
            request: MatchesRequest::Today,
            rendered: rendered("2024-05-01", &["[L] A 1–0 B — t"]),
        },
    );
    assert!(state.triggers_enabled());
    assert_eq!(state.pending, None);
    assert_eq!(state.status, "date: 2024-05-01 • matches: 1");
    assert_eq!(state.list, vec!["[L] A 1–0 B — t".to_string()]);
}

#[test]
fn load_trigger_uses_the_date_input() {
    let mut state = state();
    state.date_input = " 2024-06-02 ".to_string();
    let cmd = state.request_date();
    assert_eq!(
        cmd,
        Some(ProviderCommand::FetchMatches(MatchesRequest::Date(
            "2024-06-02".to_string()
        )))
    );
    assert_eq!(state.status, "loading 2024-06-02…");
}

#[test]
fn failure_clears_list_but_keeps_error_status() {
    let mut state = state();
    apply_delta(
        &mut state,
        Delta::SetMatches {
            request: MatchesRequest::Today,
            rendered: rendered("2024-05-01", &["one", "two"]),
        },
    );
    assert_eq!(state.list.len(), 2);

    state.request_date();
    apply_delta(
        &mut state,
        Delta::FetchFailed {
            request: MatchesRequest::Date("2024-05-01".to_string()),
            message: "HTTP 500 • boom".to_string(),
        },
    );
    assert!(state.list.is_empty());
    assert_eq!(state.status, "error: HTTP 500 • boom");
    assert!(state.triggers_enabled());
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[ERROR] date 2024-05-01: HTTP 500 • boom")
    );
}

#[test]
fn each_result_replaces_the_previous_one() {
    let mut state = state();
    apply_delta(
        &mut state,
        Delta::SetMatches {
            request: MatchesRequest::Today,
            rendered: rendered("2024-05-01", &["a", "b", "c"]),
        },
    );
    state.list_scroll = 2;
    apply_delta(
        &mut state,
        Delta::SetMatches {
            request: MatchesRequest::Date("2024-05-02".to_string()),
            rendered: RenderedMatches {
                date: "2024-05-02".to_string(),
                count: 0,
                status: "date: 2024-05-02 • matches: 0".to_string(),
                lines: vec![EMPTY_MESSAGE.to_string()],
            },
        },
    );
    assert_eq!(state.list, vec![EMPTY_MESSAGE.to_string()]);
    assert_eq!(state.shown_date.as_deref(), Some("2024-05-02"));
    assert_eq!(state.list_scroll, 0);
}

#[test]
fn aborted_request_reports_and_reenables() {
    let mut state = state();
    state.request_today();
    state.abort_request("request worker stopped");
    assert!(state.triggers_enabled());
    assert_eq!(state.status, "error: request worker stopped");
}

#[test]
fn date_input_editing() {
    let mut state = state();
    state.push_date_char('9');
    assert_eq!(state.date_input, "2024-05-01", "input is capped at ten characters");

    state.shift_date_input(1);
    assert_eq!(state.date_input, "2024-05-02");
    state.shift_date_input(-2);
    assert_eq!(state.date_input, "2024-04-30");

    for _ in 0..3 {
        state.pop_date_char();
    }
    assert_eq!(state.date_input, "2024-04");
    state.push_date_char('x');
    state.push_date_char('-');
    state.push_date_char('1');
    assert_eq!(state.date_input, "2024-04-1");

    state.shift_date_input(1);
    assert_eq!(state.date_input, "2024-04-1");
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[WARN]")));
}

#[test]
fn log_is_bounded() {
    let mut state = state();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] 50"));
}

#[test]
fn scroll_stops_at_the_last_line() {
    let mut state = state();
    state.list = vec!["a".to_string(), "b".to_string()];
    for _ in 0..5 {
        state.scroll_down();
    }
    assert_eq!(state.list_scroll, 1);
    state.scroll_up();
    state.scroll_up();
    assert_eq!(state.list_scroll, 0);
}

#[test]
fn scroll_on_a_list_longer_than_u16_saturates() {
    let mut state = state();
    state.list = vec![String::new(); 70_000];
    state.list_scroll = u16::MAX - 1;
    state.scroll_down();
    state.scroll_down();
    assert_eq!(state.list_scroll, u16::MAX);
}
