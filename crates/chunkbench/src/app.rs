//! Application entry point and dispatch.

use anyhow::Result;
use tracing::info;

use chunkbench_cli::output::write_json;
use chunkbench_cli::presenter::{CLIResultPresenter, JsonPresenter};
use chunkbench_cli::ui::print_verdict;
use chunkbench_orchestration::interfaces::ResultPresenter;
use chunkbench_orchestration::orchestrator::run_operation;
use chunkbench_orchestration::selection::{operations_to_run, strategies_to_run};
use chunkbench_orchestration::OperationReport;

use crate::config::{AppConfig, OutputFormat};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        chunkbench_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    run_sweep(config)
}

fn run_sweep(config: &AppConfig) -> Result<()> {
    let opts = config.sweep_options();
    let operations = operations_to_run(&config.op)?;
    let strategies = strategies_to_run(&config.strategy)?;
    info!(
        operations = operations.len(),
        strategies = strategies.len(),
        workers = opts.workers,
        "starting sweep"
    );

    let presenter: Box<dyn ResultPresenter> = match config.format {
        OutputFormat::Text => Box::new(CLIResultPresenter::new(config.verbose, config.quiet)),
        OutputFormat::Json => Box::new(JsonPresenter),
    };

    let reports = operations
        .into_iter()
        .map(|operation| {
            run_operation(operation, &opts, &strategies, config.baseline, presenter.as_ref())
        })
        .collect::<Result<Vec<OperationReport>, _>>()?;

    match config.format {
        OutputFormat::Json => write_json(&mut std::io::stdout().lock(), &reports)?,
        OutputFormat::Text => {
            if !config.quiet {
                println!();
                print_verdict(&reports);
            }
        }
    }

    // The first failure decides the exit status.
    for report in &reports {
        report.status()?;
    }
    Ok(())
}
