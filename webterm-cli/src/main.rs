mod app;
mod event;
mod theme;
mod ui;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event as TermEvent, KeyEventKind, MouseEventKind};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use webterm_core::{
    Backend, Client, ClientConfig, Effect, HttpBackend, LineStyle, Mode, ScrollLine, Scrollback,
    SessionId, Submission, dispatch,
};

use app::App;
use event::{AppEvent, KeyInput, classify_key};

#[derive(Parser)]
#[command(name = "webterm", about = "Terminal client for a remote command-execution backend")]
struct Args {
    /// Backend base URL (default: stored config, then http://localhost:5000)
    #[arg(long, env = "WEBTERM_SERVER_URL")]
    server_url: Option<String>,

    /// Start in AI mode
    #[arg(long, conflicts_with = "normal")]
    ai: bool,

    /// Start in normal mode, even if the stored config says AI
    #[arg(long)]
    normal: bool,

    /// Reuse an existing session id instead of generating one
    #[arg(long)]
    session_id: Option<String>,

    /// Leave mouse capture off (keeps native terminal selection)
    #[arg(long)]
    no_mouse: bool,

    /// Run a single command without the TUI and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Connect timeout in seconds. Requests themselves are not timed out.
    #[arg(long, default_value = "5")]
    timeout_secs: u64,

    /// Write the effective server URL and start mode to ~/.webterm/config.json
    #[arg(long)]
    save_config: bool,
}

fn cleanup_terminal() {
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Set up file-based tracing (logs go to ~/.webterm/webterm.log)
    {
        let log_dir = ClientConfig::data_dir();
        std::fs::create_dir_all(&log_dir).ok();
        let log_file = std::fs::File::create(log_dir.join("webterm.log"))?;

        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::try_from_env("WEBTERM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(log_file)
            .with_ansi(false)
            .init();
    }

    let args = Args::parse();

    let mut config = ClientConfig::load().unwrap_or_default();
    apply_overrides(&args, &mut config);
    if args.save_config {
        config.save()?;
    }

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::with_connect_timeout(
        config.server_url.clone(),
        Duration::from_secs(args.timeout_secs),
    )?);
    let session_id = args
        .session_id
        .clone()
        .map(SessionId::from)
        .unwrap_or_else(SessionId::generate);
    let mode = if config.start_in_ai_mode {
        Mode::Ai
    } else {
        Mode::Normal
    };
    tracing::info!(session = %session_id, server = %config.server_url, ?mode, "starting");

    if let Some(command) = &args.command {
        return run_headless(backend, session_id, mode, command).await;
    }

    // Install panic hook that restores the terminal
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        cleanup_terminal();
        default_hook(info);
    }));

    let terminal = ratatui::init();
    if !args.no_mouse {
        crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;
    }

    let app = App::new(Client::new(session_id, mode), config.server_url);
    let result = run_app(terminal, app, backend).await;

    cleanup_terminal();

    result.map(|()| ExitCode::SUCCESS)
}

/// CLI flags win over stored config.
fn apply_overrides(args: &Args, config: &mut ClientConfig) {
    if let Some(url) = &args.server_url {
        config.server_url = url.clone();
    }
    if args.ai {
        config.start_in_ai_mode = true;
    } else if args.normal {
        config.start_in_ai_mode = false;
    }
}

/// Print everything but the echoed command line, errors to `err`.
/// Returns true if any error line was printed.
fn print_lines(
    lines: &[ScrollLine],
    out: &mut impl Write,
    err: &mut impl Write,
) -> std::io::Result<bool> {
    let mut failed = false;
    for line in lines {
        match line.style {
            LineStyle::CommandExecuted => {}
            LineStyle::Error => {
                failed = true;
                writeln!(err, "{}", line.text)?;
            }
            _ => writeln!(out, "{}", line.text)?,
        }
    }
    Ok(failed)
}

async fn run_headless(
    backend: Arc<dyn Backend>,
    session_id: SessionId,
    mode: Mode,
    command: &str,
) -> anyhow::Result<ExitCode> {
    let mut client = Client::with_scrollback(session_id, mode, Scrollback::with_banner(Vec::new()));
    let prompt = backend.fetch_prompt(client.session_id()).await;
    client.apply_system_info(prompt);

    client.input_mut().replace(command);
    if let Submission::Request(request) = client.submit() {
        let reply = dispatch(backend.as_ref(), request).await;
        client.apply_reply(reply);
    }

    let failed = print_lines(
        client.state().scrollback.lines(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;
    if failed {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn run_app(
    mut terminal: DefaultTerminal,
    mut app: App,
    backend: Arc<dyn Backend>,
) -> anyhow::Result<()> {
    // Unified event channel
    let (app_tx, mut app_rx) = mpsc::unbounded_channel::<AppEvent>();

    // Stop flag for the event reader thread
    let stop = Arc::new(AtomicBool::new(false));

    // Terminal event reader; polls with a timeout so it can observe the stop flag
    let term_tx = app_tx.clone();
    let stop_reader = Arc::clone(&stop);
    tokio::task::spawn_blocking(move || {
        while !stop_reader.load(Ordering::Relaxed) {
            if crossterm::event::poll(Duration::from_millis(50)).unwrap_or(false) {
                match crossterm::event::read() {
                    Ok(ev) => {
                        if term_tx.send(AppEvent::Terminal(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        }
    });

    // Tick timer for spinner animation
    let tick_tx = app_tx.clone();
    let stop_tick = Arc::clone(&stop);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(100));
        loop {
            interval.tick().await;
            if stop_tick.load(Ordering::Relaxed) {
                break;
            }
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // SIGTERM handler for graceful shutdown
    let sigterm_tx = app_tx.clone();
    tokio::spawn(async move {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut sig) = signal(SignalKind::terminate()) {
            sig.recv().await;
            let _ = sigterm_tx.send(AppEvent::Quit);
        }
    });

    // One-shot prompt sync
    {
        let info_tx = app_tx.clone();
        let backend = Arc::clone(&backend);
        let session_id = app.client.session_id().clone();
        tokio::spawn(async move {
            let prompt = backend.fetch_prompt(&session_id).await;
            let _ = info_tx.send(AppEvent::SystemInfo(prompt));
        });
    }

    loop {
        // Draw only when dirty
        if app.dirty {
            let size = terminal.size()?;
            let vh = ui::history_viewport_height(size.height);
            let vw = size.width as usize;
            // Clamp scroll_offset (especially for scroll_to_bottom's usize::MAX)
            app.clamp_scroll(vh, vw);

            terminal.draw(|frame| ui::draw(frame, &app))?;
            app.dirty = false;
        }

        let event = match app_rx.recv().await {
            Some(e) => e,
            None => break,
        };

        match event {
            AppEvent::Terminal(TermEvent::Key(key)) => {
                // With kitty keyboard protocol, ignore Release/Repeat events
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.dirty = true;

                match classify_key(&key) {
                    KeyInput::Quit => break,
                    KeyInput::Action(action) => match app.client.handle_key(action) {
                        Effect::Quit => break,
                        Effect::Send(request) => {
                            app.scroll_to_bottom();
                            let reply_tx = app_tx.clone();
                            let backend = Arc::clone(&backend);
                            tokio::spawn(async move {
                                let reply = dispatch(backend.as_ref(), request).await;
                                let _ = reply_tx.send(AppEvent::Reply(reply));
                            });
                        }
                        Effect::None => app.scroll_to_bottom(),
                    },
                    KeyInput::Edit(edit) => app.apply_edit(edit),
                    KeyInput::PageUp => {
                        let size = terminal.size()?;
                        app.scroll_up(ui::history_viewport_height(size.height).max(1));
                    }
                    KeyInput::PageDown => {
                        let size = terminal.size()?;
                        let vh = ui::history_viewport_height(size.height);
                        app.scroll_down(vh.max(1), vh, size.width as usize);
                    }
                    KeyInput::Ignore => app.dirty = false,
                }
            }
            AppEvent::Terminal(TermEvent::Mouse(mouse)) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    app.scroll_up(3);
                    app.dirty = true;
                }
                MouseEventKind::ScrollDown => {
                    let size = terminal.size()?;
                    let vh = ui::history_viewport_height(size.height);
                    app.scroll_down(3, vh, size.width as usize);
                    app.dirty = true;
                }
                _ => {}
            },
            AppEvent::Terminal(TermEvent::Resize(_, _)) => app.dirty = true,
            AppEvent::Terminal(_) => {}
            AppEvent::Reply(reply) => {
                app.client.apply_reply(reply);
                if !app.scrolled_back {
                    app.scroll_to_bottom();
                }
                app.dirty = true;
            }
            AppEvent::SystemInfo(prompt) => {
                app.client.apply_system_info(prompt);
                app.dirty = true;
            }
            AppEvent::Tick => {
                if app.is_awaiting() {
                    app.tick += 1;
                    app.dirty = true;
                }
            }
            AppEvent::Quit => break,
        }
    }

    // Signal reader thread and tick timer to stop
    stop.store(true, Ordering::Relaxed);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn print(lines: &[ScrollLine]) -> (bool, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let failed = print_lines(lines, &mut out, &mut err).unwrap();
        (
            failed,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn print_lines_success_only() {
        let (failed, out, err) = print(&[
            ScrollLine::new("a  b", LineStyle::Success),
            ScrollLine::info("AI Mode enabled. Use natural language commands."),
        ]);
        assert!(!failed);
        assert_eq!(out, "a  b\nAI Mode enabled. Use natural language commands.\n");
        assert!(err.is_empty());
    }

    #[test]
    fn print_lines_errors_go_to_stderr() {
        let (failed, out, err) = print(&[
            ScrollLine::new("partial", LineStyle::Success),
            ScrollLine::error("No such file"),
        ]);
        assert!(failed);
        assert_eq!(out, "partial\n");
        assert_eq!(err, "No such file\n");
    }

    #[test]
    fn print_lines_skips_echoed_command() {
        let (failed, out, err) = print(&[
            ScrollLine::new("$ ls", LineStyle::CommandExecuted),
            ScrollLine::new("file", LineStyle::Success),
        ]);
        assert!(!failed);
        assert_eq!(out, "file\n");
        assert!(err.is_empty());
    }

    fn stored_ai() -> ClientConfig {
        ClientConfig {
            server_url: "http://stored:5000".into(),
            start_in_ai_mode: true,
        }
    }

    #[test]
    fn normal_flag_overrides_stored_ai_mode() {
        let args = Args::try_parse_from(["webterm", "--normal"]).unwrap();
        let mut config = stored_ai();
        apply_overrides(&args, &mut config);
        assert!(!config.start_in_ai_mode);
    }

    #[test]
    fn no_flags_keep_stored_config() {
        let args = Args::try_parse_from(["webterm", "--server-url", "http://cli:1"]).unwrap();
        let mut config = stored_ai();
        apply_overrides(&args, &mut config);
        assert!(config.start_in_ai_mode);
        assert_eq!(config.server_url, "http://cli:1");
    }

    #[test]
    fn ai_and_normal_conflict() {
        assert!(Args::try_parse_from(["webterm", "--ai", "--normal"]).is_err());
    }
}
