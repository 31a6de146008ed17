//! Quiz TUI - terminal client for the quiz game backend
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async backend calls

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use quiz_tui::app::{AppActor, AppState, ProfileState};
use quiz_tui::config::{Config, TokenStore};
use quiz_tui::constants::{APP_NAME, DEFAULT_LOG_FILE};
use quiz_tui::messages::ui_events::key_to_ui_event;
use quiz_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent, View};
use quiz_tui::models::Partida;
use quiz_tui::network::{NetworkActor, QuizClient};
use quiz_tui::ui::{centered_rect, option_line, progress_line, render_nav};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Game session to play, as returned by the backend when a game starts (JSON)
    #[arg(short, long)]
    partida: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Config file (default: ~/.quiz-tui/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn load_partida(path: &Path) -> anyhow::Result<Partida> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading game session {}", path.display()))?;
    let partida = serde_json::from_str(&content)
        .with_context(|| format!("parsing game session {}", path.display()))?;
    Ok(partida)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging to file
    let log_dir = args
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let log_name = args
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    let partida = args.partida.as_deref().map(load_partida).transpose()?;
    tracing::info!(api = %config.api_base_url, has_session = partida.is_some(), "Starting {}", APP_NAME);

    let tokens = TokenStore::new(config.token_path());
    let state = AppState::new(tokens, partida);
    let client = QuizClient::new(config.api_base_url.clone());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

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

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

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
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) =
                    key_to_ui_event(key, current_state.view, current_state.show_help)
                {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
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

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Nav bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(chunks[0]);
    f.render_widget(
        Paragraph::new(Span::styled(APP_NAME, Style::default().fg(Color::Cyan).bold())),
        header[0],
    );
    f.render_widget(render_nav(state.view), header[1]);

    match state.view {
        View::Login => draw_login(f, state, chunks[1]),
        View::Game => draw_game(f, state, chunks[1]),
        View::Results => draw_results(f, state, chunks[1]),
        View::Profile => draw_profile(f, state, chunks[1]),
    }

    draw_status_bar(f, state, chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_login(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup = centered_rect(60, 40, area);

    let mut lines = vec![
        Line::from("Paste the access token issued by the login service."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Token: "),
            Span::styled(
                "•".repeat(state.login_input_len),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
    ];
    if let Some(message) = &state.login_message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if state.has_token {
        lines.push(Line::from(Span::styled(
            "A token is already stored. Enter a new one to replace it.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Login ");
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn draw_game(f: &mut Frame, state: &RenderState, area: Rect) {
    // Nothing to render when the state does not address a question
    let Some(game) = &state.game else {
        return;
    };

    let option_rows = u16::try_from(game.options.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Player + points
            Constraint::Length(4),           // Category + prompt
            Constraint::Length(option_rows), // Options
            Constraint::Length(1),           // Action
            Constraint::Length(1),           // Progress
            Constraint::Min(0),
        ])
        .split(area);

    let player = Line::from(vec![
        Span::styled(game.player_name.clone(), Style::default().bold()),
        Span::styled(" · game in progress", Style::default().fg(Color::DarkGray)),
        Span::raw("   "),
        Span::styled(
            format!("✨ {} pts", game.points),
            Style::default().fg(Color::Black).bg(Color::White),
        ),
    ]);
    f.render_widget(Paragraph::new(player), chunks[0]);

    let kind = if game.is_multiple { "multiple answers" } else { "single answer" };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " {} · {}/{} · {} ",
            game.category, game.question_number, game.question_count, kind
        ));
    f.render_widget(
        Paragraph::new(game.prompt.as_str())
            .block(block)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    let options: Vec<ListItem> = game
        .options
        .iter()
        .enumerate()
        .map(|(i, o)| ListItem::new(option_line(o, i == state.option_focus)))
        .collect();
    f.render_widget(
        List::new(options).block(Block::default().borders(Borders::ALL).title(" Options ")),
        chunks[2],
    );

    let action_style = if game.action_enabled {
        Style::default().fg(Color::Black).bg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let action_text = if game.loading {
        String::from(" [...] ")
    } else {
        format!(" {} ", game.action.as_str())
    };
    f.render_widget(
        Paragraph::new(Span::styled(action_text, action_style)).centered(),
        chunks[3],
    );

    f.render_widget(Paragraph::new(progress_line(&game.steps)), chunks[4]);

    if let Some(notice) = &game.notice {
        let popup = centered_rect(50, 20, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(match &game.notice_time {
                Some(time) => format!(" Error at {} (x to dismiss) ", time),
                None => String::from(" Error (x to dismiss) "),
            })
            .style(Style::default().bg(Color::Black));
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(notice.as_str())
                .block(block)
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn draw_results(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(results) = &state.results else {
        return;
    };
    let popup = centered_rect(60, 50, area);

    let category = results.partida.category.clone().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            results.partida.player_name.clone(),
            Style::default().bold(),
        )),
        Line::from(Span::styled(
            category.to_uppercase(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} pts", results.resultado.total_points),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(format!("{} questions", results.partida.total_questions)),
        Line::from(""),
        Line::from(Span::styled(
            "p: my profile · q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Results ");
    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block).centered(), popup);
}

fn draw_profile(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    match &state.profile {
        ProfileState::Idle | ProfileState::Loading => {
            f.render_widget(
                Paragraph::new("Loading...")
                    .centered()
                    .block(Block::default().borders(Borders::ALL).title(" My Profile ")),
                area,
            );
        }
        ProfileState::Failed(message) => {
            f.render_widget(
                Paragraph::new(Span::styled(message.as_str(), Style::default().fg(Color::Red)))
                    .centered()
                    .wrap(Wrap { trim: false })
                    .block(Block::default().borders(Borders::ALL).title(" My Profile ")),
                area,
            );
        }
        ProfileState::Loaded { stats, entries } => {
            let stat = |value: String, label: &'static str| {
                vec![
                    Span::styled(value, Style::default().fg(Color::Yellow).bold()),
                    Span::styled(format!(" {}   ", label), Style::default().fg(Color::DarkGray)),
                ]
            };
            let mut spans = stat(stats.games.to_string(), "GAMES");
            spans.extend(stat(stats.total_points.to_string(), "TOTAL POINTS"));
            spans.extend(stat(stats.average_points.to_string(), "AVERAGE"));
            f.render_widget(
                Paragraph::new(vec![
                    Line::from("Your progress as an expert"),
                    Line::from(""),
                    Line::from(spans),
                ])
                .block(Block::default().borders(Borders::ALL).title(" My Profile ")),
                chunks[0],
            );

            let block = Block::default().borders(Borders::ALL).title(" Recent games ");
            if entries.is_empty() {
                f.render_widget(
                    Paragraph::new("You have not finished any game yet.")
                        .centered()
                        .block(block),
                    chunks[1],
                );
                return;
            }
            let rows: Vec<Row> = entries
                .iter()
                .map(|e| {
                    Row::new(vec![
                        Cell::from(e.category.clone()),
                        Cell::from(e.display_date()),
                        Cell::from(format!("{} pts", e.points)),
                        Cell::from(format!("{} / {} correct", e.hits, e.total_questions)),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(30),
                    Constraint::Percentage(25),
                    Constraint::Percentage(15),
                    Constraint::Percentage(30),
                ],
            )
            .header(
                Row::new(vec!["Category", "Date", "Points", "Hits"])
                    .style(Style::default().fg(Color::Cyan).bold()),
            )
            .block(block);
            f.render_widget(table, chunks[1]);
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = match state.view {
        View::Login => " Enter:save token | Esc:quit ",
        View::Game => {
            if state.game.as_ref().is_some_and(|g| g.loading) {
                " Submitting... "
            } else {
                " ↑/↓:move | Space/1-9:select | Enter:confirm | p:profile | ?:help | q:quit "
            }
        }
        View::Results => " p:profile | q:quit ",
        View::Profile => " r:reload | l:login | ?:help | q:quit ",
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 QUIZ TUI - Keyboard Shortcuts

 GAME
   ↑ / ↓  (k / j)     Move between options
   Space              Select / unselect the highlighted option
   1 - 9              Select / unselect an option directly
   Enter / s          Confirm answer, then next question
   x / Esc            Dismiss an error message
   p                  Leave the game and open your profile

 PROFILE
   r                  Reload history
   l                  Log in with another token

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

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
