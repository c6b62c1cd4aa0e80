//! Element-wise `f32` addition kernels for the vector-add micro-benchmark.
//!
//! Два пути вычисления одной и той же суммы `r[i] = a[i] + b[i]`:
//! - [`ScalarAdder`]: plain per-element loop
//! - [`VectorAdder`]: explicit 128-bit SIMD, 4 lanes per iteration, scalar tail
//!
//! Both produce bit-identical output. Buffers come from [`AlignedBuffer`],
//! which guarantees the 32-byte alignment the aligned load/store path expects.

pub mod adder;
pub mod aligned;
pub mod pattern;
pub mod scalar;
pub mod simd;
pub mod simd_feature_detection;

pub use adder::{Adder, KernelKind};
pub use aligned::{AlignedBuffer, SIMD_ALIGNMENT};
pub use pattern::{fill_pattern, sample, verify_sum};
pub use scalar::{add_scalar, ScalarAdder};
pub use simd::{add_vectorized, vector_prefix_len, VectorAdder, VectorBackend, LANES};
pub use simd_feature_detection::{CpuInfo, SimdLevel};
