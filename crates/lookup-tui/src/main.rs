//! Competency Lookup - a terminal front end for participant competency data.
//!
//! Run without arguments for the interactive TUI, or with one of the
//! one-shot commands below to print a single answer and exit.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lookup_core::analysis::{
    competency_values, extract_competencies, lookup, participant_names, summarize_named,
};
use lookup_core::api::{fetch_error_message, ParticipantProvider};
use lookup_core::config::Config;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written by the TUI, inside the cache directory
const LOG_FILE: &str = "lookup.log";

const USAGE: &str = "\
Usage: lookup [--file <path>] [COMMAND]

Without a command, starts the interactive terminal UI.

Commands:
  --competencies                      List competencies
  --participants                      List participant names
  --participant <name> <competency>   Look up one participant's value
  --summary <competency> <mode>       Summarise a competency (lowest, highest, average, type)
  --init-config                       Write the default config file
  --help                              Show this message

Options:
  --file <path>                       Read participants from a JSON file instead of HTTP";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr, for one-shot commands
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a file, so output doesn't corrupt the alternate screen.
/// The returned guard must live until shutdown to flush buffered lines.
fn init_file_tracing() -> Option<WorkerGuard> {
    let dir = Config::log_dir().ok()?;
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();

    Some(guard)
}

// ============================================================================
// Argument Parsing
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Tui,
    Competencies,
    Participants,
    Participant { name: String, competency: String },
    Summary { competency: String, mode: String },
    InitConfig,
    Help,
}

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    file: Option<PathBuf>,
    command: Command,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut rest = args;
    let mut file = None;

    if rest.first().map(String::as_str) == Some("--file") {
        match rest.get(1) {
            Some(path) => file = Some(PathBuf::from(path)),
            None => bail!("--file needs a path\n\n{}", USAGE),
        }
        rest = &rest[2..];
    }

    let command = match rest {
        [] => Command::Tui,
        [cmd] if cmd == "--competencies" => Command::Competencies,
        [cmd] if cmd == "--participants" => Command::Participants,
        [cmd, name, competency] if cmd == "--participant" => Command::Participant {
            name: name.clone(),
            competency: competency.clone(),
        },
        [cmd, competency, mode] if cmd == "--summary" => Command::Summary {
            competency: competency.clone(),
            mode: mode.clone(),
        },
        [cmd] if cmd == "--init-config" => Command::InitConfig,
        [cmd] if cmd == "--help" || cmd == "-h" => Command::Help,
        _ => bail!("Unrecognised arguments: {}\n\n{}", rest.join(" "), USAGE),
    };

    Ok(CliArgs { file, command })
}

fn load_config() -> Config {
    match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %format!("{:#}", e), "Failed to load config, using defaults");
            let mut config = Config::default();
            config.apply_env_override(std::env::var(lookup_core::config::ENDPOINT_ENV_VAR).ok());
            config
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    if cli.command != Command::Tui {
        init_tracing();
        return run_command(cli).await;
    }

    // Held until shutdown so buffered log lines are flushed
    let _log_guard = init_file_tracing();
    info!("Competency Lookup starting");

    let config = load_config();
    let provider = ParticipantProvider::from_config(&config, cli.file)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and start the first load
    let mut app = App::new(provider);
    app.start_load();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Competency Lookup shutting down");
    Ok(())
}

/// Run a one-shot command and print its answer to stdout
async fn run_command(cli: CliArgs) -> Result<()> {
    match cli.command {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::InitConfig => {
            let path = Config::default().save()?;
            println!("{}", path.display());
            return Ok(());
        }
        _ => {}
    }

    let config = load_config();
    let provider = ParticipantProvider::from_config(&config, cli.file)?;
    let records = match provider.fetch().await {
        Ok(records) => records,
        Err(e) => bail!(fetch_error_message(&e)),
    };

    match cli.command {
        Command::Competencies => {
            for competency in extract_competencies(&records) {
                println!("{}", competency);
            }
        }
        Command::Participants => {
            for name in participant_names(&records) {
                println!("{}", name);
            }
        }
        Command::Participant { name, competency } => {
            println!("{}", lookup(&records, &name, &competency));
        }
        Command::Summary { competency, mode } => {
            let values = competency_values(&records, &competency);
            println!("{}", summarize_named(&values, &competency, &mode));
        }
        Command::Tui | Command::InitConfig | Command::Help => {}
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
