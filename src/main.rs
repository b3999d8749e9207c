use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mdex::app::App;
use mdex::config::Config;
use mdex::controller::CrudController;
use mdex::store::{
    FirebaseKeySwitchService, KeySwitchService, MemoryKeySwitchService, StoreHttpClient,
};
use mdex::{event, ui};
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Terminal admin for a KeySwitch catalog
#[derive(Parser, Debug)]
#[command(name = "mdex", version, about, long_about = None)]
struct Args {
    /// Realtime Database URL (overrides MDEX_FIREBASE_URL and config)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Auth token appended to every request
    #[arg(long)]
    auth_token: Option<String>,

    /// Use an in-memory store seeded with sample data
    #[arg(long)]
    memory: bool,

    /// Number of sample records for --memory
    #[arg(long, default_value_t = 5)]
    samples: usize,

    /// Remember --base-url in the config file
    #[arg(long)]
    save_config: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Run in read-only mode (block all write operations)
    #[arg(long)]
    readonly: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("mdex started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("mdex").join("mdex.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".mdex").join("mdex.log");
    }
    PathBuf::from("mdex.log")
}

/// Pick the backend before the terminal is taken over, so config errors
/// print normally.
fn build_store(args: &Args, config: &mut Config) -> Result<Arc<dyn KeySwitchService>> {
    if args.memory {
        tracing::info!("Using in-memory store with {} samples", args.samples);
        return Ok(Arc::new(MemoryKeySwitchService::with_samples(args.samples)));
    }

    let base_url = config.effective_base_url(args.base_url.as_deref())?;
    if args.save_config {
        config.set_base_url(&base_url)?;
    }

    let http = StoreHttpClient::new().context("Failed to create HTTP client")?;
    let store = FirebaseKeySwitchService::new(http, &base_url)
        .with_collection(&config.effective_collection())
        .with_auth_token(config.effective_auth_token(args.auth_token.as_deref()));

    tracing::info!("Using store {}", store.describe());
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    let store = build_store(&args, &mut config)?;

    let mut app = App::new(CrudController::new(store), config, args.readonly);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;
    cleanup_terminal(&mut terminal)?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // First frame shows "Loading..." while the snapshot is fetched
    app.loading = true;
    terminal.draw(|f| ui::render(f, app))?;
    app.initialize().await;

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::handle_events(app).await? {
            return Ok(());
        }
    }
}
