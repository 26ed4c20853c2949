use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use egpu_perfmon::ui::{dashboard, Theme};
use egpu_perfmon::{events, extract, App, DataSource, FileSource, Overrides, Settings};

#[derive(Parser, Debug)]
#[command(name = "egpu-perfmon")]
#[command(about = "Live terminal dashboard for Anarchy eGPU performance statistics")]
struct Args {
    /// Update interval in seconds [default: 1.0]
    #[arg(short, long)]
    interval: Option<f64>,

    /// Path to the driver's statistics file
    /// [default: /sys/kernel/debug/anarchy-egpu/performance/statistics]
    #[arg(short, long)]
    stats_file: Option<PathBuf>,

    /// TOML settings file (interval_secs, stats_file, window_size, graph_height,
    /// retry_delay_ms, throughput_floor, latency_floor)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Extract one snapshot, write it as JSON to this file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    let overrides = Overrides {
        interval_secs: args.interval,
        stats_file: args.stats_file.clone(),
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;

    // The first read decides whether the monitor can run at all; later
    // failures are shown on the dashboard and retried.
    let mut source = FileSource::new(&settings.stats_file);
    let initial = source.read()?;
    info!(source = source.description(), "statistics source opened");

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&initial, &export_path);
    }

    let mut app = App::new(Box::new(source), &settings).with_theme(Theme::auto_detect());
    app.record_snapshot(&initial, Instant::now());

    run_tui(app)
}

/// Install a file-backed subscriber. The terminal belongs to the dashboard,
/// so without a log file nothing is logged.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = match enter_screen() {
        Ok(terminal) => terminal,
        Err(err) => {
            let _ = restore_terminal();
            return Err(err);
        }
    };

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = restore_terminal();
        original_hook(panic);
    }));

    run_app(&mut terminal, &mut app);

    info!("monitor stopped");
    restore_terminal()?;
    Ok(())
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Leave raw mode and the alternate screen and show the cursor.
///
/// Every step runs even if an earlier one fails; the first error is returned.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    raw.and(screen)
}

/// Drive ticks until the user quits.
///
/// Draw and input failures do not end the loop: they pause it, show the
/// error in the header and retry after the retry delay.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) {
    while app.is_running() {
        if let Err(err) = terminal.draw(|frame| dashboard::render(frame, app)) {
            pause_after_failure(app, format!("draw failed: {}", err));
            continue;
        }

        // Wait for a command, at most until the next tick is due
        let timeout = app.time_until_next_tick(Instant::now());
        match events::poll_event(timeout) {
            Ok(Some(Event::Key(key))) => events::handle_key_event(app, key),
            Ok(_) => {}
            Err(err) => {
                pause_after_failure(app, format!("input failed: {}", err));
            }
        }

        let now = Instant::now();
        if app.is_running() && app.tick_due(now) {
            app.tick(now);
        }
    }
}

fn pause_after_failure(app: &mut App, reason: String) {
    let wait = app.frame_failed(reason, Instant::now());
    thread::sleep(wait);
}

/// Write the record extracted from `text` to a JSON file
fn export_to_file(text: &str, export_path: &Path) -> Result<()> {
    let record = extract(text);
    let json = serde_json::to_string_pretty(&record)?;
    std::fs::write(export_path, json)
        .with_context(|| format!("cannot write {}", export_path.display()))?;

    println!("Exported snapshot to: {}", export_path.display());
    Ok(())
}
