use crate::scalar::ScalarAdder;
use crate::simd::VectorAdder;

/// Element-wise `r[i] = a[i] + b[i]` over `i in 0..a.len()`.
///
/// # Panics
/// Implementations panic if `b.len() != a.len()` or `r.len() < a.len()`.
/// Elements of `r` past `a.len()` are left untouched.
pub trait Adder {
    /// Short identifier used in logs and bench ids.
    fn name(&self) -> &'static str;

    fn add(&self, r: &mut [f32], a: &[f32], b: &[f32]);
}

/// Which compute path a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    Scalar,
    Vector,
}

impl KernelKind {
    pub fn adder(self) -> Box<dyn Adder> {
        match self {
            KernelKind::Scalar => Box::new(ScalarAdder),
            KernelKind::Vector => Box::new(VectorAdder::detect()),
        }
    }

    /// Prefix of the report's timing line, up to and including the colon.
    pub fn timing_label(self) -> &'static str {
        match self {
            KernelKind::Scalar => "Execution time :",
            KernelKind::Vector => "Execution time using manual sse:",
        }
    }
}

/// Validates the shared adder contract and returns `n`.
#[track_caller]
pub(crate) fn checked_len(r: &[f32], a: &[f32], b: &[f32]) -> usize {
    let n = a.len();
    assert_eq!(
        b.len(),
        n,
        "input length mismatch: a has {} elements, b has {}",
        n,
        b.len()
    );
    assert!(
        r.len() >= n,
        "output too short: need {} elements, got {}",
        n,
        r.len()
    );
    n
}
