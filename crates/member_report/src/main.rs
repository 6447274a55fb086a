use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use member_report::{Config, load_env, run};

async fn try_main() -> anyhow::Result<()> {
    load_env()?;
    let config = Config::from_env()?;
    info!(
        "Configuration loaded, showing up to {} recent members",
        config.recent_limit
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out).await?;
    Ok(())
}

/// Log the failure and print the single user-facing error line.
fn report_failure(err: &anyhow::Error) -> ExitCode {
    error!("❌ Report failed: {}", err);
    eprintln!("Error: {}", err);
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    match try_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}
