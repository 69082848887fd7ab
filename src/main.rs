//! GymTrack TUI - Actor-based client for the GymTrack fitness API
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::fs;
use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use gymtrack::config::Config;
use gymtrack::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use gymtrack::messages::ui_events::{key_to_ui_event, InputMode, Screen};
use gymtrack::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use gymtrack::session::SessionStore;
use gymtrack::ui::{draw_form, group_style, render_tabs, toast_color};
use gymtrack::{ApiClient, AppActor, AppState, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_dir = Config::config_dir();
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;
    let config = Config::load()?;

    // Initialize logging to file
    let log_path = config.log_path(&config_dir);
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| config_dir.clone());
    fs::create_dir_all(&log_dir)?;
    let log_name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());
    let file_appender = tracing_appender::rolling::never(&log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(api_url = %config.api_url, "Starting {} {}", APP_NAME, APP_VERSION);

    let session = SessionStore::load(&config_dir);
    let state = AppState::new(config.api_url.clone(), session);
    let client = ApiClient::new(&config);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.key_context()) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Toast
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);
    draw_toast(f, state, main_chunks[1]);

    match state.screen {
        Screen::SignIn => draw_sign_in(f, state, main_chunks[2]),
        Screen::SignUp => draw_sign_up(f, state, main_chunks[2]),
        Screen::Home => draw_home(f, state, main_chunks[2]),
        Screen::Exercise => draw_exercise(f, state, main_chunks[2]),
        Screen::History => draw_history(f, state, main_chunks[2]),
        Screen::Profile => draw_profile(f, state, main_chunks[2]),
    }

    draw_status_bar(f, state, main_chunks[3]);

    // Popups
    if state.avatar.show_input {
        draw_avatar_input_popup(f, state, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut line = if state.screen.is_app() {
        render_tabs(state.active_tab)
    } else {
        Line::from(Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ))
    };

    if let Some(user) = &state.user {
        line.push_span(Span::styled(
            format!(" Hello, {}", user.name),
            Style::default().fg(Color::Gray),
        ));
    }

    f.render_widget(Paragraph::new(line), area);
}

fn draw_toast(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(toast) = state.toast.as_ref().filter(|t| t.is_visible(Instant::now())) else {
        return;
    };

    let banner = Paragraph::new(format!(" {} ", toast.message))
        .style(Style::default().fg(Color::Black).bg(toast_color(toast.kind)).bold());
    f.render_widget(banner, area);
}

fn draw_sign_in(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.sign_in.is_submitting {
        " Sign in [...] "
    } else {
        " Sign in "
    };
    let inner = draw_card(f, title, area, 50, 70);
    draw_form(f, &state.sign_in, inner, state.input_mode == InputMode::Editing);
}

fn draw_sign_up(f: &mut Frame, state: &RenderState, area: Rect) {
    let title = if state.sign_up.is_submitting {
        " Create your account [...] "
    } else {
        " Create your account "
    };
    let inner = draw_card(f, title, area, 50, 90);
    draw_form(f, &state.sign_up, inner, state.input_mode == InputMode::Editing);
}

/// Centered bordered card, returns its inner area
fn draw_card(f: &mut Frame, title: &str, area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let card_area = centered_rect(percent_x, percent_y, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title.to_string());
    let inner = block.inner(card_area);
    f.render_widget(block, card_area);
    inner
}

fn draw_home(f: &mut Frame, state: &RenderState, area: Rect) {
    let home = &state.home;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Groups
            Constraint::Min(3),    // Exercises
        ])
        .split(area);

    // Groups
    let mut spans = Vec::new();
    for (i, group) in home.groups.iter().enumerate() {
        let is_highlighted = home.highlighted_group == Some(i);
        spans.push(Span::styled(
            format!(" {} ", group.to_uppercase()),
            group_style(is_highlighted),
        ));
        spans.push(Span::raw(" "));
    }
    if spans.is_empty() {
        spans.push(Span::styled("Loading groups...", Style::default().fg(Color::DarkGray)));
    }
    let groups = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Muscle groups (h/l) "),
    );
    f.render_widget(groups, chunks[0]);

    // Exercises
    let loading = if home.is_loading { " [...]" } else { "" };
    let title = format!(
        " Exercises: {} ({}){} ",
        home.selected_group,
        home.exercises.len(),
        loading
    );

    let items: Vec<ListItem> = home
        .exercises
        .iter()
        .map(|e| {
            ListItem::new(vec![
                Line::from(Span::styled(e.name.clone(), Style::default().bold())),
                Line::from(Span::styled(
                    format!("  {} series x {} repetitions", e.series, e.repetitions),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    format!("  {}", e.thumb_url),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !home.exercises.is_empty() {
        list_state.select(Some(home.selected_exercise));
    }
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn draw_exercise(f: &mut Frame, state: &RenderState, area: Rect) {
    let view = &state.exercise;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Exercise (b: back) ");

    let lines = match &view.details {
        None if view.is_loading => vec![Line::from("Loading...")],
        None => vec![Line::from(Span::styled(
            "Exercise not available. Press 'r' to retry.",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(exercise) => {
            let action = if view.is_registering {
                Span::styled("Registering...", Style::default().fg(Color::Yellow))
            } else {
                Span::styled(
                    "[Enter] Mark as completed",
                    Style::default().fg(Color::Green).bold(),
                )
            };
            vec![
                Line::from(Span::styled(
                    exercise.name.clone(),
                    Style::default().fg(Color::White).bold(),
                )),
                Line::from(Span::styled(
                    exercise.group.to_uppercase(),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
                Line::from(format!("Series:      {}", exercise.series)),
                Line::from(format!("Repetitions: {}", exercise.repetitions)),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Demo: {}", view.demo_url.as_deref().unwrap_or("-")),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from(action),
            ]
        }
    };

    let details = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(details, area);
}

fn draw_history(f: &mut Frame, state: &RenderState, area: Rect) {
    let view = &state.history;
    let loading = if view.is_loading { " [...]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Exercise history{} ", loading));

    let mut lines: Vec<Line> = Vec::new();
    for day in &view.days {
        lines.push(Line::from(Span::styled(
            day.title.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )));
        for entry in &day.data {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:>5}  ", entry.hour), Style::default().fg(Color::Gray)),
                Span::styled(entry.name.clone(), Style::default().bold()),
                Span::styled(
                    format!(" ({})", entry.group),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No exercises registered yet. Let's train today?",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let history = Paragraph::new(lines).block(block).scroll((view.scroll, 0));
    f.render_widget(history, area);
}

fn draw_profile(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    // User card
    let mut lines = Vec::new();
    if let Some(user) = &state.user {
        lines.push(Line::from(Span::styled(user.name.clone(), Style::default().bold())));
        lines.push(Line::from(Span::styled(
            user.email.clone(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from("Photo:"));
        lines.push(Line::from(Span::styled(
            user.avatar_url.clone().unwrap_or_else(|| "default photo".to_string()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    if state.avatar.is_uploading {
        lines.push(Line::from(Span::styled(
            "Uploading photo...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "[a] Change photo",
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(Span::styled("[x] Sign out", Style::default().fg(Color::Red))));

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Profile "))
        .wrap(Wrap { trim: false });
    f.render_widget(card, chunks[0]);

    // Form
    let title = if state.profile.is_submitting {
        " Update profile [...] "
    } else {
        " Update profile (s: save) "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);
    draw_form(f, &state.profile, inner, state.input_mode == InputMode::Editing);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Tab:next field | Enter:submit "
    } else {
        match state.screen {
            Screen::SignIn => " Tab:field | e:edit | s:sign in | n:create account | ?:help | q:quit ",
            Screen::SignUp => " Tab:field | e:edit | s:create | b:back | ?:help | q:quit ",
            Screen::Home => " 1-3:tabs | h/l:group | j/k:exercise | Enter:open | r:reload | ?:help ",
            Screen::Exercise => " Enter:mark completed | r:reload | b:back | ?:help ",
            Screen::History => " 1-3:tabs | j/k:scroll | r:reload | ?:help ",
            Screen::Profile => " Tab:field | e:edit | s:save | a:photo | x:sign out | ?:help ",
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = format!(
        r#"
 {} {} - Keyboard Shortcuts

 NAVIGATION
   1 / 2 / 3          Home / History / Profile
   b / Esc            Back

 FORMS
   Tab / Shift+Tab    Next / previous field
   e / Enter          Edit field
   s                  Submit

 HOME
   h / l              Previous / next muscle group
   j / k              Select exercise
   Enter              Open exercise
   r                  Reload

 EXERCISE
   Enter / m          Mark as completed

 PROFILE
   a                  Change photo (file path)
   x                  Sign out

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#,
        APP_NAME.to_uppercase(),
        APP_VERSION
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_avatar_input_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Change photo (Enter to upload, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    let content = if state.avatar.path_input.is_empty() {
        "Enter the image path...\n\nExample: ~/Pictures/me.png"
    } else {
        state.avatar.path_input.as_str()
    };

    let input = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
