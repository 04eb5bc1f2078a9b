//! Application logic for the chunkbench binary.

pub mod app;
pub mod config;
pub mod errors;
