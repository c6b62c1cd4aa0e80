use thiserror::Error;

/// Основная иерархия ошибок бенчмарка
// @component: {"k":"C","id":"bench_error_types","t":"Benchmark error taxonomy","m":{"cur":100,"tgt":100,"u":"%"},"f":["errors","cli","allocation"]}
#[derive(Error, Debug)]
pub enum BenchError {
    /// Missing or unparsable element count. Nothing is computed.
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    /// The result buffer broke `r[i] == a[i] + b[i]`.
    #[error("Verification failed at index {index}: expected {expected:?}, got {actual:?}")]
    Verification {
        index: usize,
        expected: f32,
        actual: f32,
    },
}

/// Aligned allocator failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("capacity overflow: {count} elements of {elem_size} bytes")]
    CapacityOverflow { count: usize, elem_size: usize },

    #[error("invalid layout: {size} bytes aligned to {align}")]
    InvalidLayout { size: usize, align: usize },

    #[error("out of memory: failed to allocate {size} bytes")]
    OutOfMemory { size: usize },
}

pub type BenchResult<T> = Result<T, BenchError>;
pub type AllocationResult<T> = Result<T, AllocationError>;

impl BenchError {
    pub fn usage(message: impl Into<String>) -> Self {
        BenchError::Usage(message.into())
    }
}
