// services/feedback-dash/src/main.rs
//
// Terminal front-end for the multilingual customer feedback analyzer
//
// Run with: cargo run --bin feedback-dash -- --demo

use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use feedback_svckit::config::{load_config, DashConfig, ObservabilityConfig};
use ratatui::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedback_dash::api::{ApiEvent, Backends, Dispatcher};
use feedback_dash::app::{App, DataMode};
use feedback_dash::cli::Args;
use feedback_dash::clipboard::SystemClipboard;
use feedback_dash::commands;
use feedback_dash::mock::MockBackend;
use feedback_dash::ui::draw_ui;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
        config.validate()?;
    }
    if let Some(ms) = args.refresh_ms {
        config.ui.tick_ms = ms;
    }

    let interactive = args.command.is_none();
    init_tracing(&config.observability, interactive)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let backends = if args.demo {
        Backends::demo(MockBackend::new())
    } else {
        Backends::http(&config.api)?
    };

    match args.command.clone() {
        Some(command) => runtime.block_on(commands::run(command, &backends, args.filter())),
        None => run_dashboard(&runtime, backends, &config, &args),
    }
}

fn init_tracing(config: &ObservabilityConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "feedback_dash={level},feedback_svckit={level}",
            level = config.log_level
        )
        .into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    // The dashboard owns the terminal, so its logs go to a file.
    if interactive {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {}", config.log_file))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn run_dashboard(
    runtime: &tokio::runtime::Runtime,
    backends: Backends,
    config: &DashConfig,
    args: &Args,
) -> Result<()> {
    let mode = if args.demo {
        DataMode::Demo
    } else {
        DataMode::Live {
            base_url: config.api.base_url.clone(),
        }
    };
    info!("Starting feedback dashboard ({:?})", mode);

    let (dispatcher, events) = Dispatcher::new(backends, runtime.handle().clone());
    let mut app = App::new(dispatcher, args.filter(), mode, Box::new(SystemClipboard));
    let tick_rate = Duration::from_millis(config.ui.tick_ms.max(10));

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run app
    let result = run_app(&mut terminal, &mut app, events, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: UnboundedReceiver<ApiEvent>,
    tick_rate: Duration,
) -> Result<()> {
    app.mount();

    loop {
        // Draw UI
        terminal.draw(|frame| draw_ui(frame, app))?;

        // Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Apply completed requests
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        if app.should_quit() {
            info!("Dashboard exiting");
            return Ok(());
        }
    }
}
