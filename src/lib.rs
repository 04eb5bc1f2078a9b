//! Workspace-level integration tests for chunkbench.
