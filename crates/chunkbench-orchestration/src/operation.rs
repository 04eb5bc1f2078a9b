//! The benchmarked operations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use chunkbench_core::ComputeError;

/// Bulk computation measured by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    VectorSum,
    MatrixAddition,
    MatrixMultiplication,
}

impl Operation {
    /// Every operation, in run order.
    pub const ALL: [Operation; 3] = [
        Operation::VectorSum,
        Operation::MatrixAddition,
        Operation::MatrixMultiplication,
    ];

    /// Stable identifier used on the command line and in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VectorSum => "vector-sum",
            Self::MatrixAddition => "matrix-addition",
            Self::MatrixMultiplication => "matrix-multiplication",
        }
    }

    /// Section title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::VectorSum => "Vector Sum",
            Self::MatrixAddition => "Matrix Addition",
            Self::MatrixMultiplication => "Matrix Multiplication",
        }
    }

    /// How one problem size is described in a size header.
    #[must_use]
    pub fn describe_size(self, size: usize) -> String {
        match self {
            Self::VectorSum => format!("an array of length {size}"),
            Self::MatrixAddition | Self::MatrixMultiplication => {
                format!("two square matrices of size {size}")
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ComputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vector-sum" | "sum" | "vector" => Ok(Self::VectorSum),
            "matrix-addition" | "add" | "addition" => Ok(Self::MatrixAddition),
            "matrix-multiplication" | "mul" | "multiplication" => Ok(Self::MatrixMultiplication),
            other => Err(ComputeError::Config(format!("unknown operation: {other}"))),
        }
    }
}
