mod analysis;
mod app;
mod cli;
mod config;
mod error;
mod state;
mod task;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use config::AppConfig;
use state::{Action, Page};
use task::TaskKind;

#[derive(Parser, Debug)]
#[command(name = "nichelens")]
#[command(version = "0.1.0")]
#[command(about = "Etsy listing optimizer demo with simulated listing analysis")]
struct Args {
    /// Print "Text AI" listing advice as JSON
    #[arg(long, conflicts_with_all = ["lhs", "snapshot"])]
    tai: bool,

    /// Print the Listing Health Score as JSON
    #[arg(long, conflicts_with = "snapshot")]
    lhs: bool,

    /// Print the competitor snapshot as JSON
    #[arg(long)]
    snapshot: bool,

    /// Listing text; --tai/--lhs read stdin when omitted, the TUI starts empty
    #[arg(short, long)]
    text: Option<String>,

    /// Page to open the TUI on
    #[arg(short, long, value_enum)]
    page: Option<Page>,

    /// Override the artificial analysis delay
    #[arg(long)]
    delay_ms: Option<u64>,
}

/// Initialize logging. The TUI owns the terminal, so it logs to a daily file
/// under the config directory; the JSON modes log to stderr. The returned
/// guard must be held until exit.
fn init_logging(tui: bool) -> Option<WorkerGuard> {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if !tui {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
        return None;
    }

    let logs_dir = AppConfig::log_dir()?;
    std::fs::create_dir_all(&logs_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "nichelens.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    registry
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(!(args.tai || args.lhs || args.snapshot));

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(delay_ms) = args.delay_ms {
        config.delay_ms = delay_ms;
        config.validate()?;
    }
    if let Some(page) = args.page {
        config.start_page = page;
    }

    // Handle CLI-only commands
    if args.snapshot {
        println!("{}", cli::snapshot_json()?);
        return Ok(());
    }

    if args.tai || args.lhs {
        let kind = if args.tai { TaskKind::Analyzer } else { TaskKind::Scorer };
        let text = cli::read_listing(args.text, io::stdin())?;
        println!("{}", cli::analysis_json(kind, text, config.delay()).await?);
        return Ok(());
    }

    // Run TUI
    run_tui(config, args.text).await
}

async fn run_tui(config: AppConfig, listing: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    if let Some(listing) = listing {
        app.state.apply(Action::SetText(listing));
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll without blocking the runtime so spawned tasks keep running
        let ready = tokio::task::block_in_place(|| event::poll(Duration::from_millis(100)))?;
        if ready {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        if app.should_quit {
            tracing::info!("Exiting");
            return Ok(());
        }

        app.tick();
    }
}
