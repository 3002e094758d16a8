//! wastedesk - a terminal admin dashboard for waste collection management.
//!
//! Signs in against the collection service, then lets admins manage user
//! accounts and everyone manage the waste items awaiting pickup.

mod app;
mod form;
mod ui;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wastedesk_core::{ApiClient, AuthManager, Config, SessionStorage};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name inside the log directory
const LOG_FILE: &str = "wastedesk.log";

const USAGE: &str = "\
Usage: wastedesk [OPTION]

Terminal dashboard for the waste collection service.

Options:
  --login      Sign in from the command line and save the session
  --logout     Forget the saved session
  --help       Show this help
  --version    Show the version

Environment:
  WASTEDESK_API_URL   Service base URL
  WASTEDESK_EMAIL     Email pre-filled on the login form
  RUST_LOG            Log filter (default: warn)";

/// Initialize the tracing subscriber, writing to a log file so the terminal
/// stays clean. The guard must live until exit to flush buffered lines.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = config.log_dir().ok()?;
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let (config, config_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let _guard = init_tracing(&config);
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if let Some(arg) = args.get(1) {
        return match arg.as_str() {
            "--login" => login_cli(config).await,
            "--logout" => logout_cli(&config),
            "--help" | "-h" => {
                println!("{}", USAGE);
                Ok(())
            }
            "--version" | "-V" => {
                println!("wastedesk {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            other => {
                eprintln!("Unknown option: {}\n\n{}", other, USAGE);
                std::process::exit(2);
            }
        };
    }

    info!("wastedesk starting");

    // Create app before touching the terminal so setup errors print normally
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Splash while the persisted session is evaluated
    let result = match terminal.draw(|f| render(f, &app)) {
        Ok(_) => {
            app.bootstrap().await;
            run_app(&mut terminal, &mut app).await
        }
        Err(e) => Err(e.into()),
    };

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

    info!("wastedesk shutting down");
    Ok(())
}

/// Sign in from stdin and persist the session for the next start
async fn login_cli(mut config: Config) -> Result<()> {
    let default_email = config.login_email();
    match &default_email {
        Some(email) => print!("Email [{}]: ", email),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let email = match input.trim() {
        "" => default_email.unwrap_or_default(),
        typed => typed.to_string(),
    };

    let password = rpassword::prompt_password("Password: ")?;

    let mut api = ApiClient::new(config.api_url())?;
    let mut auth = AuthManager::new(SessionStorage::new(config.data_dir()?));

    println!("\nSigning in to {}...", api.base_url());
    let outcome = auth.login(&mut api, &email, &password).await;

    if !outcome.succeeded() {
        anyhow::bail!(
            "{}: {}",
            outcome.notification.title,
            outcome.notification.description
        );
    }

    config.last_email = Some(email);
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    let name = auth.user().map(|u| u.display_name().to_string()).unwrap_or_default();
    println!("Signed in as {} ({}).", name, outcome.route.title());
    Ok(())
}

fn logout_cli(config: &Config) -> Result<()> {
    SessionStorage::new(config.data_dir()?).clear()?;
    info!("Persisted session cleared from the command line");
    println!("Session cleared.");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.notifications.prune(Instant::now());

        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so expired notifications disappear
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
