use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;

use asanas::app::App;
use asanas::backend::RecommendError;
use asanas::config::{self, Config, ConfigResult};
use asanas::error::AsanasError;
use asanas::oneshot::recommend_once;
use asanas::submission::GENERIC_ERROR_MESSAGE;

/// Suggest yoga asanas for a symptom or disease
#[derive(Parser, Debug)]
#[command(name = "asanas", version, about)]
struct Args {
    /// Ask once, print the suggestions and exit instead of opening the UI
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Recommendation endpoint URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Quiet period before a submit is sent, in milliseconds
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_file.as_deref());

    let ConfigResult { config, warning } = match &args.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };
    let config = apply_overrides(config, &args);

    if let Some(text) = &args.query {
        return Ok(run_once(text, &config));
    }

    // Build everything fallible before the terminal is taken over
    let app = App::from_config(&config, warning)?;

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();

    let result = run(terminal, app);

    // Restore terminal (automatic cleanup)
    ratatui::restore();

    result.map(|()| ExitCode::SUCCESS)
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        let timeout = app.next_poll_timeout(Instant::now());
        app.handle_events(timeout)?;
        app.tick();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// One request, results on stdout, exit code tells the outcome
fn run_once(text: &str, config: &Config) -> ExitCode {
    match recommend_once(text, &config.backend) {
        Ok(results) => {
            for result in results {
                println!("{result}");
            }
            ExitCode::SUCCESS
        }
        Err(AsanasError::Validation(e)) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
        Err(AsanasError::Backend(e @ RecommendError::InvalidUrl(_))) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::warn!("One-shot request failed: {}", e);
            eprintln!("{GENERIC_ERROR_MESSAGE}");
            ExitCode::FAILURE
        }
    }
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(url) = &args.url {
        config.backend.url = url.clone();
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.submission.debounce_ms = debounce_ms;
    }
    config
}

/// Log to a file; the terminal belongs to the UI
///
/// Debug builds always log (to the temp dir unless `--log-file` is given).
/// Release builds only log when `--log-file` is given.
fn init_logging(log_file: Option<&Path>) {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None if cfg!(debug_assertions) => std::env::temp_dir().join("asanas.log"),
        None => return,
    };

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };

    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}
