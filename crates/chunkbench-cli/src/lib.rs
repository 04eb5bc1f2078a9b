//! # chunkbench-cli
//!
//! Console and JSON presentation of benchmark results, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;
pub mod ui;

pub use presenter::{CLIResultPresenter, JsonPresenter};
