//! Error handling and exit codes.

use std::process::ExitCode;

use chunkbench_core::constants::exit_codes;
use chunkbench_core::ComputeError;

/// Exit code for a compute error.
pub fn handle_error(err: &ComputeError) -> i32 {
    match err {
        ComputeError::Interrupted(_) | ComputeError::WorkerPanicked(_) | ComputeError::Spawn(_) => {
            exit_codes::ERROR_GENERIC
        }
        ComputeError::Config(_) => exit_codes::ERROR_CONFIG,
        ComputeError::Mismatch => exit_codes::ERROR_MISMATCH,
    }
}

/// Exit code for any application error; non-compute errors are generic.
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    let code = err
        .downcast_ref::<ComputeError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
