//! dentreg - Dental registration wizard
//! Copyright Cybex B.V.

mod app;
mod ui;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dentreg::answers::Answers;
use dentreg::config::AppConfig;
use dentreg::constants;
use dentreg::paths;
use dentreg::sink::{ConfiguredSink, ParsedError};
use dentreg::wizard::{Variant, WizardController, WizardError};

use app::{App, AppMessage};

/// Dental clinic and job-seeker registration
#[derive(Parser)]
#[command(name = "dentreg")]
#[command(author = "Cybex B.V.")]
#[command(version = "1.0.0")]
#[command(about = "Registration wizard for dental clinics and dental professionals")]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log registrations instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a dental clinic
    Clinic,
    /// Register as a dental job seeker
    #[command(alias = "jobseeker")]
    JobSeeker,
    /// Submit a registration from a JSON answers file without the TUI
    Submit {
        /// clinic or job-seeker
        variant: String,
        /// JSON object keyed by field name
        answers: PathBuf,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging to file
    let log_dir = paths::data_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, paths::LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!("dentreg starting");

    let config = AppConfig::load().with_overrides(cli.api_url, cli.dry_run);

    match cli.command {
        Some(Commands::Clinic) => run_tui(&config, Some(Variant::Clinic)).await,
        Some(Commands::JobSeeker) => run_tui(&config, Some(Variant::JobSeeker)).await,
        Some(Commands::Submit { variant, answers }) => submit_answers(&config, &variant, &answers).await,
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        None => run_tui(&config, None).await,
    }
}

/// Fill a wizard from an answers file, walk it to the final step and submit
async fn submit_answers(config: &AppConfig, variant: &str, answers_path: &Path) -> Result<()> {
    let sink = ConfiguredSink::from_config(config)?;
    let mut controller = WizardController::create(variant)?;

    let answers = Answers::load(controller.variant(), answers_path)
        .with_context(|| format!("Failed to load {}", answers_path.display()))?;
    answers.apply(&mut controller)?;

    while !controller.is_final_step() {
        controller.next();
    }

    println!(
        "Submitting {} registration to {}",
        controller.variant().label(),
        sink.describe()
    );

    match controller.submit(&sink).await {
        Ok(ack) => {
            println!("✓ Registration accepted");
            if let Some(id) = &ack.id {
                println!("  Reference: {}", id);
            }
            if let Some(message) = &ack.message {
                println!("  {}", message);
            }
            Ok(())
        }
        Err(WizardError::Submit(e)) => {
            let parsed = ParsedError::from_submit_error(&e);
            eprintln!("✗ {}", parsed.summary);
            if let Some(detail) = &parsed.detail {
                eprintln!("  {}", detail);
            }
            eprintln!("  {}", parsed.suggestion);
            bail!("registration was not accepted")
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_tui(config: &AppConfig, initial: Option<Variant>) -> Result<()> {
    let sink = ConfiguredSink::from_config(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(sink);

    // Message channel must be in place before a wizard opens
    let (msg_tx, mut msg_rx) = mpsc::channel::<AppMessage>(constants::MESSAGE_CHANNEL_SIZE);
    app.set_message_sender(msg_tx);
    if let Some(variant) = initial {
        app.open_wizard(variant);
    }

    let result = run_app(&mut terminal, &mut app, &mut msg_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    println!("Logs: {}", paths::data_dir().display());

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        return Err(err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    msg_rx: &mut mpsc::Receiver<AppMessage>,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let timeout = Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS);

        tokio::select! {
            biased;  // Prioritize in order: keys, messages, timeout

            Some(Ok(event)) = event_stream.next() => {
                if let Event::Key(key) = event {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code).await?;
                    }
                }
            }
            // Submission results and close signals
            Some(msg) = msg_rx.recv() => {
                app.handle_message(msg).await?;
            }
            // Timeout for spinner animation and redraw
            _ = tokio::time::sleep(timeout) => {}
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
