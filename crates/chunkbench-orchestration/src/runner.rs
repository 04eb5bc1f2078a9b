//! Repeated timed invocation.

use std::time::Instant;

use chunkbench_core::ComputeError;

/// Durations of every run plus the output of the first one.
#[derive(Debug, Clone)]
pub struct Timing<T> {
    pub durations_ns: Vec<u64>,
    pub output: T,
}

impl<T> Timing<T> {
    /// Integer mean of the recorded durations.
    #[must_use]
    pub fn average_ns(&self) -> u64 {
        average(&self.durations_ns)
    }
}

/// Integer mean, `0` for no samples.
#[must_use]
pub fn average(durations_ns: &[u64]) -> u64 {
    if durations_ns.is_empty() {
        return 0;
    }
    let total: u128 = durations_ns.iter().map(|&d| u128::from(d)).sum();
    u64::try_from(total / durations_ns.len() as u128).unwrap_or(u64::MAX)
}

/// Invoke `f` `runs` times (at least once), timing each call.
///
/// Stops at the first error. Every run must produce the same output as the
/// first; a run that does not fails the measurement with
/// `ComputeError::Mismatch`.
pub fn measure<T, F>(runs: u32, mut f: F) -> Result<Timing<T>, ComputeError>
where
    T: PartialEq,
    F: FnMut() -> Result<T, ComputeError>,
{
    let runs = runs.max(1);
    let mut durations_ns = Vec::with_capacity(runs as usize);
    let mut first: Option<T> = None;
    for _ in 0..runs {
        let start = Instant::now();
        let output = f()?;
        let elapsed = start.elapsed();
        durations_ns.push(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX));
        match &first {
            Some(expected) if *expected != output => return Err(ComputeError::Mismatch),
            Some(_) => {}
            None => first = Some(output),
        }
    }
    match first {
        Some(output) => Ok(Timing {
            durations_ns,
            output,
        }),
        None => Err(ComputeError::Interrupted("no run completed".into())),
    }
}
