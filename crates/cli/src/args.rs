use clap::Parser;
use common::BenchError;
use kernels::KernelKind;

/// Element-wise addition of two f32 tables, timed.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct BenchArgs {
    /// Number of items in table
    #[arg(value_name = "N", value_parser = parse_element_count)]
    pub element_count: usize,
}

/// Everything a single run needs; derived from the one CLI argument plus the
/// compute path baked into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub element_count: usize,
    pub kernel: KernelKind,
}

impl BenchArgs {
    pub fn into_config(self, kernel: KernelKind) -> RunConfig {
        RunConfig {
            element_count: self.element_count,
            kernel,
        }
    }
}

/// Base-10 non-negative integer that fits in `usize`.
pub fn parse_element_count(raw: &str) -> Result<usize, BenchError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| BenchError::usage(format!("`{raw}` is not a valid table size ({e})")))
}
