pub mod config;
pub mod shell;
pub mod speller;

use clap::Parser;
use config::AppConfig;
use shell::cli::Cli;
use shell::App;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub fn run() -> ExitCode {
    // Load .env file from the working directory if there is one
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins; otherwise -v / -vv pick the level.
    // Logs go to stderr so reports on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match AppConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(async move {
        let mut app = match App::from_config(&config) {
            Ok(app) => app,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        };

        if cli.files.is_empty() {
            if let Err(e) = app.check_dropped().await {
                eprintln!("error: failed to read paths from stdin: {}", e);
                return ExitCode::FAILURE;
            }
        } else {
            app.check_files(cli.files).await;
        }

        tracing::info!(
            "[Shell] Finished: {} completed, {} failed",
            app.completed_runs(),
            app.failed_runs()
        );

        if app.failed_runs() > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}
