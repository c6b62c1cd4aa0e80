pub mod errors;
pub mod structured_logging;
pub mod timer;

pub use errors::{AllocationError, AllocationResult, BenchError, BenchResult};

pub use structured_logging::{init_structured_logging, LoggingConfig, OperationTimer};

pub use timer::{Timer, Timestamp};
