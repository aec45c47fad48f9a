//! CLI entry point for the cable tester.
//!
//! ```bash
//! cable-tester health
//! cable-tester list
//! cable-tester test rj45
//! CABLE_TESTER_BACKEND__MODE=http cable-tester test xlr3
//! ```

#[cfg(not(test))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use cable_tester::config::{AppConfig, DEFAULT_CONFIG_PATH};
use cable_tester::logging;
use cable_tester::{build_backend, PinoutCatalog, Presenter, TestSession};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tester_core::{Pinout, TestResult};

#[derive(Parser)]
#[command(name = "cable-tester")]
#[command(about = "Cable continuity tester", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the configured log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the configured backend
    Health,

    /// List available pinouts
    List,

    /// Run one continuity test
    Test {
        /// Pinout key (see `list`)
        pinout: String,
    },
}

/// Prints session output to stdout.
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn show_home(&self, catalog: &PinoutCatalog) {
        for pinout in catalog.iter() {
            println!("{:<8} {} ({} pins)", pinout.key(), pinout.title(), pinout.pin_count());
        }
    }

    fn show_pinout(&self, pinout: &Pinout) {
        println!("{}", pinout.title());
    }

    fn show_result(&self, result: &TestResult, status_line: &str) {
        for (pin, status) in result.per_pin.iter() {
            println!("  pin {pin:>3}: {status}");
        }
        println!(
            "{status_line} ({} ok, {} bad)",
            result.ok_count(),
            result.bad_count()
        );
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(level) = cli.log_level {
        config.application.log_level = level;
    }
    logging::init_from_config(&config)?;
    tracing::info!(name = %config.application.name, mode = %config.backend.mode, "Starting");

    let catalog = PinoutCatalog::builtin(config.backend.pin_count)?;
    let backend = build_backend(&config.backend)?;
    let session = Arc::new(TestSession::new(catalog, backend, Arc::new(ConsolePresenter)));

    match cli.command {
        Commands::Health => {
            let health = session.health().await;
            println!("{health}");
            Ok(if health.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::List => {
            session.return_home();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Test { pinout } => {
            session.select_pinout(&pinout)?;
            let passed = session
                .run_active_test()
                .await?
                .is_some_and(|result| result.passed);
            Ok(if passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
