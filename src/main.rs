use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::sync::mpsc;

use loadline::action::Action;
use loadline::app::App;
use loadline::capture;
use loadline::config::{self, load_config, load_config_from_path};
use loadline::event::{Event, EventHandler};
use loadline::logging;
use loadline::metrics::{MonitoringRegistry, SampleScheduler, SysinfoSource};
use loadline::ui;

#[derive(Parser)]
#[command(
    name = "loadline",
    about = "TUI CPU and RAM load chart with a running-maximum marker"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling interval in milliseconds
    #[arg(long)]
    interval: Option<u64>,

    /// Number of samples kept per metric
    #[arg(long)]
    capacity: Option<usize>,

    /// Metric shown at startup: cpu, ram
    #[arg(long)]
    metric: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Sample without a terminal UI and print the windows as JSON.
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Number of ticks to record in headless mode.
    #[arg(long, default_value_t = 10)]
    headless_ticks: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path)?;
    }
    let config = load_config_for_cli(&cli);

    if cli.headless {
        return run_headless(config, &cli).await;
    }

    let mut terminal = ratatui::init();
    let enhanced = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        // Key release events drive the hold-to-pause gesture.
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    } else {
        tracing::info!("terminal lacks key release events, hold-to-pause disabled");
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if enhanced {
            let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    if enhanced {
        execute!(stdout(), PopKeyboardEnhancementFlags)?;
    }
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let (notify, samples) = mpsc::unbounded_channel();
    let mut app = App::new(&config, Box::new(SysinfoSource::new()), notify);
    let mut events = EventHandler::new(samples);
    app.start();

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) => {
                let action = app.map_key(key);
                let handled = action != Action::None;
                app.dispatch(action);
                handled
            }
            Event::Sampled(report) => {
                app.on_sampled(&report);
                true
            }
            Event::Housekeeping => {
                let had_message = app.status_message.is_some();
                app.on_housekeeping();
                had_message && app.status_message.is_none()
            }
            Event::Resize => true,
        };
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

async fn run_headless(config: config::Config, cli: &Cli) -> Result<()> {
    let (notify, mut samples) = mpsc::unbounded_channel();
    let mut scheduler = SampleScheduler::new(
        MonitoringRegistry::new(config.general.window_capacity),
        SysinfoSource::new(),
        Duration::from_millis(config.general.sample_interval_ms),
        notify,
    );
    let report = capture::run_capture(&mut scheduler, &mut samples, cli.headless_ticks).await?;
    println!("{}", report.to_json()?);
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(interval) = cli.interval {
        config.general.sample_interval_ms = interval;
    }
    if let Some(capacity) = cli.capacity {
        config.general.window_capacity = capacity;
    }
    if let Some(ref metric) = cli.metric {
        config.general.default_metric = metric.clone();
    }
    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }

    config.sanitized()
}
