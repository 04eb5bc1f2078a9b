//! chunkbench: chunked parallel computation benchmark.

use std::process::ExitCode;

use chunkbench_lib::{app, config, errors};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Parse CLI args and run
    let config = config::AppConfig::parse();
    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            chunkbench_cli::ui::print_error(&format!("{err:#}"));
            errors::exit_code(&err)
        }
    }
}
