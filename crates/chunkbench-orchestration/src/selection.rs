//! Strategy and operation selection from command-line lists.

use std::str::FromStr;

use chunkbench_core::{ComputeError, Strategy};

use crate::operation::Operation;

/// Strategies named by `spec`: `all` or a comma-separated list.
pub fn strategies_to_run(spec: &str) -> Result<Vec<Strategy>, ComputeError> {
    select(spec, &Strategy::ALL, "strategy")
}

/// Operations named by `spec`: `all` or a comma-separated list.
pub fn operations_to_run(spec: &str) -> Result<Vec<Operation>, ComputeError> {
    select(spec, &Operation::ALL, "operation")
}

fn select<T>(spec: &str, all: &[T], what: &str) -> Result<Vec<T>, ComputeError>
where
    T: FromStr<Err = ComputeError> + PartialEq + Copy,
{
    if spec.trim().eq_ignore_ascii_case("all") {
        return Ok(all.to_vec());
    }
    let mut selected = Vec::new();
    for name in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let item = name.parse::<T>()?;
        if !selected.contains(&item) {
            selected.push(item);
        }
    }
    if selected.is_empty() {
        return Err(ComputeError::Config(format!("no {what} selected")));
    }
    Ok(selected)
}
