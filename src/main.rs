use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;

use ghostterm::app::{self, App};
use ghostterm::cli::Cli;
use ghostterm::config::{self, Config};
use ghostterm::executor;
use ghostterm::session::{LineKind, TerminalSession};

fn main() -> Result<ExitCode> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    #[cfg(debug_assertions)]
    init_logging();

    let cli = Cli::parse();
    let mut config = config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    if let Some(command) = &cli.command {
        return run_once(&config, command);
    }

    let mut app = App::from_config(&config)?;

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let mut terminal = ratatui::init();
    let result = app::run(&mut terminal, &mut app);
    ratatui::restore();

    result?;
    Ok(ExitCode::SUCCESS)
}

/// Run a single line through the configured executor without the TUI
fn run_once(config: &Config, command: &str) -> Result<ExitCode> {
    let mut session = TerminalSession::headless(executor::from_config(&config.backend)?);
    session.submit(command);

    let mut failed = false;
    for line in session.lines() {
        match line.kind {
            LineKind::Command => {}
            LineKind::Output => println!("{}", line.content),
            LineKind::Error => {
                eprintln!("{}", line.content);
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Debug builds log to a file in the temp dir; stdout belongs to the TUI
#[cfg(debug_assertions)]
fn init_logging() {
    let path = std::env::temp_dir().join("ghostterm-debug.log");
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("ghostterm=debug"),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init();
}
