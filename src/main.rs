use std::io;
use std::sync::mpsc;

use anyhow::Context;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use matchday_terminal::config::{load_dotenv, ViewerConfig};
use matchday_terminal::feed::spawn_provider;
use matchday_terminal::render::EMPTY_MESSAGE;
use matchday_terminal::state::{apply_delta, AppState, Delta, ProviderCommand};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(state: AppState, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.help_overlay = false;
            }
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('t') | KeyCode::Char('T') => self.fetch_today(),
            KeyCode::Enter => self.fetch_date(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => self.state.push_date_char(c),
            KeyCode::Backspace => self.state.pop_date_char(),
            KeyCode::Left => self.state.shift_date_input(-1),
            KeyCode::Right => self.state.shift_date_input(1),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('?') => self.state.help_overlay = true,
            _ => {}
        }
    }

    fn fetch_today(&mut self) {
        if let Some(cmd) = self.state.request_today() {
            self.send(cmd);
        }
    }

    fn fetch_date(&mut self) {
        if let Some(cmd) = self.state.request_date() {
            self.send(cmd);
        }
    }

    fn send(&mut self, cmd: ProviderCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            self.state.abort_request("request worker stopped");
        }
    }
}

fn main() -> anyhow::Result<()> {
    load_dotenv();
    let config = ViewerConfig::from_env();

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend).context("terminal")?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(config.api_base.clone(), config.timeout, tx, cmd_rx);

    let state = AppState::new(config.api_base.clone(), config.initial_date.clone());
    let mut app = App::new(state, cmd_tx);
    app.fetch_today();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;

    res.context("ui loop")
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(format!("  MATCHDAY | API {}", state.api_base))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_controls(frame, chunks[1], state);

    let status_style = if state.status.starts_with("error:") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(Paragraph::new(state.status.as_str()).style(status_style), chunks[2]);

    render_list(frame, chunks[3], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[4]);

    let footer = Paragraph::new(footer_text())
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[5]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_controls(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(10)])
        .split(area);

    let input = Paragraph::new(format!("{}_", state.date_input))
        .block(Block::default().title("Date").borders(Borders::ALL));
    frame.render_widget(input, cols[0]);

    let trigger_style = if state.triggers_enabled() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let triggers = Line::from(vec![
        Span::styled("[t] Today", trigger_style),
        Span::raw("   "),
        Span::styled("[Enter] Load date", trigger_style),
    ]);
    let buttons = Paragraph::new(triggers).block(Block::default().borders(Borders::ALL));
    frame.render_widget(buttons, cols[1]);
}

fn render_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = match &state.shown_date {
        Some(date) => format!("Matches {date}"),
        None => "Matches".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let text = state.list.join("\n");
    let style = if state.list.len() == 1 && state.list[0] == EMPTY_MESSAGE {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let list = Paragraph::new(text)
        .style(style)
        .block(block)
        .scroll((state.list_scroll, 0));
    frame.render_widget(list, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn footer_text() -> &'static str {
    "t Today | Enter Load | 0-9/- Edit date | ←/→ Day | j/k/↑/↓ Scroll | ? Help | q Quit"
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchday - Help",
        "",
        "  t            Fetch today's matches",
        "  Enter        Fetch matches for the date field",
        "  0-9 / -      Type into the date field",
        "  Backspace    Delete last character",
        "  ← / →        Previous / next day",
        "  j/k or ↑/↓   Scroll the list",
        "  ?            Toggle help",
        "  q / Esc      Quit",
        "",
        "Fetch keys are ignored while a request is in flight.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
