//! Fixed thread per chunk on crossbeam scoped threads.
//!
//! One named OS thread is spawned per unit of a flat plan. Units are never
//! empty (the partitioner skips empty chunks), and every spawned thread is
//! joined before the first failure is reported.

use crossbeam::thread;
use tracing::debug;

use crate::lifecycle::{Invocation, Phase};
use crate::workload::{panic_message, ComputeError};

/// Run `work` once per unit, each on its own scoped thread, and return the
/// results in unit order.
pub fn map_units<U, T, F>(
    units: Vec<U>,
    invocation: &mut Invocation<'_>,
    work: F,
) -> Result<Vec<T>, ComputeError>
where
    U: Send,
    T: Send,
    F: Fn(U) -> T + Sync,
{
    let count = units.len();
    invocation.advance(Phase::Dispatched);
    debug!(threads = count, "spawning scoped workers");

    let work = &work;
    let scoped = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(count);
        let mut first_error = None;
        for (index, unit) in units.into_iter().enumerate() {
            let spawned = scope
                .builder()
                .name(format!("chunkbench-thread-{index}"))
                .spawn(move |_| work(unit));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    first_error = Some(ComputeError::Spawn(e.to_string()));
                    break;
                }
            }
        }
        if first_error.is_none() {
            invocation.advance(Phase::Running);
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.join() {
                Ok(value) => results.push(value),
                Err(payload) => {
                    first_error.get_or_insert_with(|| {
                        ComputeError::WorkerPanicked(panic_message(payload.as_ref()))
                    });
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => {
                invocation.advance(Phase::Joined);
                Ok(results)
            }
        }
    });

    scoped.map_err(|payload| ComputeError::WorkerPanicked(panic_message(payload.as_ref())))?
}
