//! Cube Transfer: terminal client
//!
//! Runs the transfer flow in-process and drives it from the keyboard.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::watch;
use tracing::{debug, info, Instrument};

use transfer_flow::adapters::{InMemoryClipboard, InMemoryDisplayBus, SystemClock};
use transfer_flow::{metrics, FlowHandle, FlowRuntime, TransferConfig};
use transfer_telemetry::{flow_span, init_telemetry, TelemetryConfig};
use transfer_tui::{demo, ui, App};

/// Cube Transfer terminal client
#[derive(Parser, Debug)]
#[command(name = "transfer-tui")]
#[command(about = "Keyboard-driven bank transfer flow")]
struct Args {
    /// Single-transfer limit (overrides CT_MAX_SINGLE_TRANSFER)
    #[arg(long)]
    max_single: Option<u64>,

    /// Available balance (overrides CT_AVAILABLE_BALANCE)
    #[arg(long)]
    balance: Option<u64>,

    /// Verifying phase length in milliseconds
    #[arg(long)]
    verify_ms: Option<u64>,

    /// Verified-to-commit delay in milliseconds
    #[arg(long)]
    commit_ms: Option<u64>,

    /// JSON recipient directory; a built-in list is used when omitted
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Log file (stdout belongs to the terminal UI)
    #[arg(long, default_value = "transfer-tui.log", env = "CT_LOG_FILE")]
    log_file: PathBuf,

    /// Print Prometheus counters after exit
    #[arg(long)]
    print_metrics: bool,
}

impl Args {
    fn transfer_config(&self) -> anyhow::Result<TransferConfig> {
        let mut config = TransferConfig::from_env();
        if let Some(max) = self.max_single {
            config.limits.max_single_transfer = max;
        }
        if let Some(balance) = self.balance {
            config.limits.available_balance = balance;
        }
        if let Some(ms) = self.verify_ms {
            config.auth.verify_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = self.commit_ms {
            config.auth.commit_delay = Duration::from_millis(ms);
        }
        config.validate().context("invalid transfer configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.transfer_config()?;
    let directory = demo::load_directory(args.directory.as_deref())
        .context("failed to load recipient directory")?;

    let telemetry = TelemetryConfig::from_env().with_log_file(&args.log_file);
    let _guard = init_telemetry(telemetry).context("failed to initialize logging")?;

    let display = Arc::new(InMemoryDisplayBus::new());
    let clipboard = Arc::new(InMemoryClipboard::new());
    let (handle, runtime) = FlowRuntime::build(
        config.clone(),
        display.clone(),
        clipboard.clone(),
        Arc::new(SystemClock),
    )?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runtime_task = tokio::spawn(runtime.run(shutdown_rx));
    info!(
        recipients = directory.len(),
        max_single = config.limits.max_single_transfer,
        balance = config.limits.available_balance,
        "Terminal client started"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut app = App::new(directory, config.limits, config.quick_amounts.clone());
    let result = run_app(&mut terminal, &mut app, &handle, &display).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Receiver may already be gone if the runtime stopped on its own
    let _ = shutdown_tx.send(true);
    let service = runtime_task.await.context("flow runtime panicked")?;
    info!(
        screen = %service.active_screen(),
        shares = clipboard.copies(),
        "Terminal client stopped"
    );

    if args.print_metrics {
        print!("{}", metrics::render());
    }
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    handle: &FlowHandle,
    display: &InMemoryDisplayBus,
) -> anyhow::Result<()> {
    let mut seen = 0;
    loop {
        // Pick up views published by commands or timers
        let published = display.published();
        if published != seen {
            seen = published;
            if let Some(view) = display.latest() {
                app.apply_view(view);
            }
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = app.handle_key(key) {
                        let span = flow_span!("key_command", command = command.name());
                        let outcome = handle.execute(command).instrument(span).await;
                        if let Err(err) = outcome {
                            debug!(error = %err, "Command rejected");
                            if err.is_misuse() {
                                app.error_message = Some(err.to_string());
                            }
                        }
                    }
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
