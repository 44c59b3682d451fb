//! Taskmaster TUI Entry Point
//!
//! Usage:
//!   taskmaster-tui [OPTIONS]
//!
//! Options:
//!   -u, --base-url <URL>        Backend root (default: http://127.0.0.1:5000)
//!   -c, --config <FILE>         Configuration file
//!   -t, --timeout-secs <SECS>   Per-request timeout
//!
//! Logs go to `<state dir>/taskmaster/tui.log`; set `RUST_LOG` for more.

use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskmaster_core::{
    default_config_path, load_config_from_path, ClientConfig, ConfigOverrides, HttpBackend,
};
use taskmaster_tui::App;

/// Taskmaster - task list with a chat persona, in your terminal
#[derive(Parser, Debug)]
#[command(name = "taskmaster-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Backend root URL
    #[arg(short = 'u', long, value_name = "URL")]
    base_url: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "TASKMASTER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short = 't', long, value_name = "SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: taskmaster-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin/stdout are piped or the session has no TTY");
        eprintln!("(for SSH, pass -t).");
        std::process::exit(1);
    }

    let log_path = init_logging()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = ?log_path, "Taskmaster TUI starting");

    let config = resolve_config(&args)?;
    let backend = HttpBackend::from_config(&config)
        .with_context(|| format!("Invalid backend URL: {}", config.base_url))?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let mut app = App::new(backend, config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Layer CLI flags over file and environment configuration
fn resolve_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path).context("Failed to load configuration")?;

    let mut overrides = ConfigOverrides::new();
    if let Some(ref url) = args.base_url {
        overrides = overrides.with_base_url(url.clone());
    }
    if let Some(secs) = args.timeout_secs {
        overrides = overrides.with_request_timeout_secs(secs);
    }
    overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.request_timeout.as_secs(),
        tone = %config.tone,
        source = %config.source,
        "Configuration resolved"
    );
    Ok(config)
}

/// Send tracing output to a log file so the terminal stays clean
///
/// Returns the log path, or `None` when no state directory is known (logging
/// is then disabled).
fn init_logging() -> anyhow::Result<Option<PathBuf>> {
    let Some(dir) = dirs::state_dir().or_else(dirs::cache_dir) else {
        return Ok(None);
    };
    let dir = dir.join("taskmaster");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let path = dir.join("tui.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taskmaster_tui=info,taskmaster_core=info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .with(filter)
        .init();

    Ok(Some(path))
}
