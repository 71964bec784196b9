use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;

use postdraft::ai::spawn_worker;
use postdraft::app::App;
use postdraft::config::{AiProviderType, ConfigResult, load_config};

/// How long to wait for input before polling the worker again
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Draft a blog post with live title and tag suggestions",
    long_about = None
)]
struct Cli {
    /// Path to a config file (defaults to <config dir>/postdraft/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Characters that must change before suggestions refresh
    #[arg(long, value_name = "N")]
    threshold: Option<usize>,

    /// Use the built-in offline assistant instead of a remote provider
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();

    #[cfg(debug_assertions)]
    init_logging();

    let ConfigResult {
        mut config,
        warning,
    } = load_config(cli.config.as_deref());
    if let Some(threshold) = cli.threshold {
        config.suggestions.threshold = threshold;
    }
    if cli.offline {
        config.ai.provider = AiProviderType::Placeholder;
    }

    let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
    let (response_tx, response_rx) = std::sync::mpsc::channel();
    let worker = spawn_worker(&config, request_rx, response_tx)?;

    let mut app = App::new(&config);
    app.set_channels(request_tx, response_rx);
    app.status = warning;

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();
    let result = run(terminal, &mut app);
    ratatui::restore();

    // Dropping the app closes the request channel, which stops the worker
    let submitted = app.submitted.take();
    drop(app);
    if worker.join().is_err() {
        log::warn!("Assistant worker panicked");
    }

    result?;

    if let Some(draft) = submitted {
        println!("{}", draft.to_json()?);
    }
    Ok(())
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        app.poll_responses();
        terminal.draw(|frame| app.render(frame))?;

        app.handle_events(EVENT_POLL_INTERVAL)?;
        app.tick();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Log to a file in the temp dir; stderr belongs to the TUI
#[cfg(debug_assertions)]
fn init_logging() {
    use std::io::Write;

    let path = std::env::temp_dir().join("postdraft.log");
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    else {
        return;
    };

    let env = env_logger::Env::default().default_filter_or("postdraft=debug");
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}
