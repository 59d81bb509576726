use sipsa_cli::cli;
use sipsa_cli::errors::AppError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::Io(e.to_string()))
        .and_then(|rt| rt.block_on(cli::cli()));

    ExitCode::from(cli::report_outcome(&result, &mut std::io::stdout()))
}
