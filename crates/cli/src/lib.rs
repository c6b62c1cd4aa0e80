//! Vector-add benchmark driver
//!
//! Shared by the `compute-simple` (scalar) and `compute-sse` (vector) binaries.

pub mod args;
pub mod driver;
pub mod report;

pub use args::{parse_element_count, BenchArgs, RunConfig};
pub use driver::{entrypoint, run};
pub use report::{RunReport, SAMPLE_LEN};
