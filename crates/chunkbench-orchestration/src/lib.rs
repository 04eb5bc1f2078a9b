//! # chunkbench-orchestration
//!
//! Benchmark harness: seeded instance generation, repeated timing, the size
//! sweep, strategy selection, and cross-strategy result analysis.

pub mod instances;
pub mod interfaces;
pub mod operation;
pub mod options;
pub mod orchestrator;
pub mod runner;
pub mod selection;

pub use interfaces::{Measurement, OperationReport, ResultPresenter, SizeReport};
pub use operation::Operation;
pub use options::{sweep_sizes, SweepOptions};
pub use orchestrator::{analyze_consistency, run_operation};
