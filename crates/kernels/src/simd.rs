//! Manually vectorised element-wise add, 4 × f32 per 128-bit register.
//!
//! The first `floor(n / 4) * 4` elements go through the vector unit, the
//! remaining `n % 4` through the scalar loop. Every backend uses the same
//! IEEE-754 single-precision add per lane, so the output is bit-identical to
//! [`add_scalar`].
//!
//! | backend    | load            | add          | store            |
//! |------------|-----------------|--------------|------------------|
//! | `Sse`      | `_mm_load_ps`   | `_mm_add_ps` | `_mm_store_ps`   |
//! | `Neon`     | `vld1q_f32`     | `vaddq_f32`  | `vst1q_f32`      |
//! | `Portable` | `[f32; 4]` chunk loop                             |
//!
//! SSE falls back to `_mm_loadu_ps` / `_mm_storeu_ps` when any of the three
//! slices is not 16-byte aligned, so the safe API never hits an alignment
//! fault. Buffers from [`AlignedBuffer`](crate::AlignedBuffer) always take
//! the aligned path.

use tracing::trace;

use crate::adder::{checked_len, Adder};
use crate::scalar::add_scalar;
use crate::simd_feature_detection::SimdLevel;

/// 32-bit lanes per 128-bit register.
pub const LANES: usize = 128 / (std::mem::size_of::<f32>() * 8);

/// Length of the prefix handled by full vector chunks.
#[inline]
pub const fn vector_prefix_len(n: usize) -> usize {
    (n / LANES) * LANES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorBackend {
    Sse,
    Neon,
    Portable,
}

impl VectorBackend {
    pub fn detect() -> Self {
        Self::for_level(SimdLevel::detect())
    }

    pub fn for_level(level: SimdLevel) -> Self {
        match level {
            SimdLevel::Sse2 | SimdLevel::Sse41 | SimdLevel::Avx2 => VectorBackend::Sse,
            SimdLevel::Neon => VectorBackend::Neon,
            SimdLevel::None => VectorBackend::Portable,
        }
    }

    /// Whether this backend can run on the compilation target.
    pub fn is_available(self) -> bool {
        match self {
            VectorBackend::Sse => cfg!(target_arch = "x86_64"),
            VectorBackend::Neon => cfg!(target_arch = "aarch64"),
            VectorBackend::Portable => true,
        }
    }

    fn name(self) -> &'static str {
        match self {
            VectorBackend::Sse => "vector/sse",
            VectorBackend::Neon => "vector/neon",
            VectorBackend::Portable => "vector/portable",
        }
    }
}

/// Vectorised adder bound to one backend.
#[derive(Debug, Clone, Copy)]
pub struct VectorAdder {
    backend: VectorBackend,
}

impl VectorAdder {
    /// Best backend for the running CPU.
    pub fn detect() -> Self {
        Self {
            backend: VectorBackend::detect(),
        }
    }

    /// Pin a backend; unavailable backends degrade to `Portable`.
    pub fn with_backend(backend: VectorBackend) -> Self {
        let backend = if backend.is_available() {
            backend
        } else {
            VectorBackend::Portable
        };
        Self { backend }
    }

    pub fn backend(&self) -> VectorBackend {
        self.backend
    }
}

impl Default for VectorAdder {
    fn default() -> Self {
        Self::detect()
    }
}

impl Adder for VectorAdder {
    fn name(&self) -> &'static str {
        self.backend.name()
    }

    fn add(&self, r: &mut [f32], a: &[f32], b: &[f32]) {
        add_with_backend(self.backend, r, a, b);
    }
}

/// Vectorised add with the detected backend.
///
/// # Panics
/// If `b.len() != a.len()` or `r.len() < a.len()`.
pub fn add_vectorized(r: &mut [f32], a: &[f32], b: &[f32]) {
    add_with_backend(VectorBackend::detect(), r, a, b);
}

fn add_with_backend(backend: VectorBackend, r: &mut [f32], a: &[f32], b: &[f32]) {
    let n = checked_len(r, a, b);
    let prefix = vector_prefix_len(n);

    add_chunks(backend, &mut r[..prefix], &a[..prefix], &b[..prefix]);

    if prefix < n {
        // Хвост, не заполняющий целый регистр
        trace!(tail = n - prefix, "scalar tail fallback");
        add_scalar(&mut r[prefix..n], &a[prefix..n], &b[prefix..n]);
    }
}

/// Full-chunk part; slices have equal length, a multiple of `LANES`.
fn add_chunks(backend: VectorBackend, r: &mut [f32], a: &[f32], b: &[f32]) {
    debug_assert!(r.len() == a.len() && a.len() == b.len());
    debug_assert_eq!(r.len() % LANES, 0);

    match backend {
        #[cfg(target_arch = "x86_64")]
        VectorBackend::Sse => sse::add_chunks(r, a, b),
        #[cfg(target_arch = "aarch64")]
        VectorBackend::Neon => neon::add_chunks(r, a, b),
        _ => portable::add_chunks(r, a, b),
    }
}

#[cfg(target_arch = "x86_64")]
mod sse {
    use std::arch::x86_64::{_mm_add_ps, _mm_load_ps, _mm_loadu_ps, _mm_store_ps, _mm_storeu_ps};

    use super::LANES;

    const SSE_ALIGN: usize = 16;

    fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % SSE_ALIGN == 0
    }

    // SSE2 входит в baseline x86_64, target_feature не нужен.
    pub(super) fn add_chunks(r: &mut [f32], a: &[f32], b: &[f32]) {
        let aligned = is_aligned(r.as_ptr()) && is_aligned(a.as_ptr()) && is_aligned(b.as_ptr());

        let chunks = r
            .chunks_exact_mut(LANES)
            .zip(a.chunks_exact(LANES))
            .zip(b.chunks_exact(LANES));

        if aligned {
            for ((rc, ac), bc) in chunks {
                // SAFETY: each chunk holds exactly LANES floats; chunk offsets
                // are multiples of 16 bytes from 16-byte aligned bases.
                unsafe {
                    let va = _mm_load_ps(ac.as_ptr());
                    let vb = _mm_load_ps(bc.as_ptr());
                    _mm_store_ps(rc.as_mut_ptr(), _mm_add_ps(va, vb));
                }
            }
        } else {
            for ((rc, ac), bc) in chunks {
                // SAFETY: each chunk holds exactly LANES floats; unaligned ops.
                unsafe {
                    let va = _mm_loadu_ps(ac.as_ptr());
                    let vb = _mm_loadu_ps(bc.as_ptr());
                    _mm_storeu_ps(rc.as_mut_ptr(), _mm_add_ps(va, vb));
                }
            }
        }
    }
}

#[cfg(target_arch = "aarch64")]
mod neon {
    use std::arch::aarch64::{vaddq_f32, vld1q_f32, vst1q_f32};

    use super::LANES;

    pub(super) fn add_chunks(r: &mut [f32], a: &[f32], b: &[f32]) {
        for ((rc, ac), bc) in r
            .chunks_exact_mut(LANES)
            .zip(a.chunks_exact(LANES))
            .zip(b.chunks_exact(LANES))
        {
            // SAFETY: each chunk holds exactly LANES floats; NEON is baseline on
            // aarch64 and vld1q/vst1q have no alignment requirement.
            unsafe {
                let va = vld1q_f32(ac.as_ptr());
                let vb = vld1q_f32(bc.as_ptr());
                vst1q_f32(rc.as_mut_ptr(), vaddq_f32(va, vb));
            }
        }
    }
}

mod portable {
    use super::LANES;

    pub(super) fn add_chunks(r: &mut [f32], a: &[f32], b: &[f32]) {
        for ((rc, ac), bc) in r
            .chunks_exact_mut(LANES)
            .zip(a.chunks_exact(LANES))
            .zip(b.chunks_exact(LANES))
        {
            for lane in 0..LANES {
                rc[lane] = ac[lane] + bc[lane];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligned::AlignedBuffer;

    fn inputs(n: usize) -> (Vec<f32>, Vec<f32>) {
        let a = (0..n).map(|i| i as f32).collect();
        let b = (0..n).map(|i| i as f32 * 2.0).collect();
        (a, b)
    }

    fn all_backends() -> Vec<VectorAdder> {
        [
            VectorBackend::Sse,
            VectorBackend::Neon,
            VectorBackend::Portable,
        ]
        .into_iter()
        .map(VectorAdder::with_backend)
        .collect()
    }

    #[test]
    fn test_lanes_is_four() {
        assert_eq!(LANES, 4);
    }

    #[test]
    fn test_vector_prefix_len() {
        assert_eq!(vector_prefix_len(0), 0);
        assert_eq!(vector_prefix_len(3), 0);
        assert_eq!(vector_prefix_len(4), 4);
        assert_eq!(vector_prefix_len(10), 8);
        assert_eq!(vector_prefix_len(17), 16);
    }

    #[test]
    fn test_eight_elements() {
        let (a, b) = inputs(8);
        let mut r = vec![0.0; 8];
        add_vectorized(&mut r, &a, &b);
        assert_eq!(r, vec![0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0]);
    }

    #[test]
    fn test_tail_is_computed_for_every_backend() {
        for adder in all_backends() {
            for n in [1usize, 2, 3, 5, 6, 7, 10] {
                let (a, b) = inputs(n);
                let mut r = vec![f32::NAN; n];
                adder.add(&mut r, &a, &b);
                for i in 0..n {
                    assert_eq!(r[i], 3.0 * i as f32, "{} n={} i={}", adder.name(), n, i);
                }
            }
        }
    }

    #[test]
    fn test_tail_of_ten_elements() {
        let (a, b) = inputs(10);
        let mut r = vec![-1.0; 10];
        add_vectorized(&mut r, &a, &b);
        assert_eq!(&r[8..], &[24.0, 27.0]);
    }

    #[test]
    fn test_unaligned_slices_match_scalar() {
        let (a, b) = inputs(37);
        let mut expected = vec![0.0; 36];
        add_scalar(&mut expected, &a[1..], &b[1..]);

        for adder in all_backends() {
            let mut r = vec![0.0; 37];
            adder.add(&mut r[1..], &a[1..], &b[1..]);
            assert_eq!(&r[1..], &expected[..], "{}", adder.name());
        }
    }

    #[test]
    fn test_aligned_buffers() {
        let a = AlignedBuffer::from_fn(1027, |i| i as f32).unwrap();
        let b = AlignedBuffer::from_fn(1027, |i| i as f32 * 2.0).unwrap();
        let mut r = AlignedBuffer::zeroed(1027).unwrap();

        VectorAdder::detect().add(&mut r, &a, &b);
        assert!(r.iter().enumerate().all(|(i, &x)| x == 3.0 * i as f32));
    }

    #[test]
    fn test_bit_identical_to_scalar_on_awkward_values() {
        let a = [0.1f32, -0.0, f32::MAX, 1e-38, 3.3, f32::MIN_POSITIVE, 1.5, -2.25, 7.0];
        let b = [0.2f32, 0.0, f32::MAX, -1e-38, 1e-8, f32::MIN_POSITIVE, -1.5, 2.25, f32::INFINITY];
        let mut expected = [0.0f32; 9];
        add_scalar(&mut expected, &a, &b);

        for adder in all_backends() {
            let mut r = [0.0f32; 9];
            adder.add(&mut r, &a, &b);
            let got: Vec<u32> = r.iter().map(|x| x.to_bits()).collect();
            let want: Vec<u32> = expected.iter().map(|x| x.to_bits()).collect();
            assert_eq!(got, want, "{}", adder.name());
        }
    }

    #[test]
    fn test_unavailable_backend_degrades_to_portable() {
        #[cfg(target_arch = "x86_64")]
        assert_eq!(
            VectorAdder::with_backend(VectorBackend::Neon).backend(),
            VectorBackend::Portable
        );
        #[cfg(target_arch = "aarch64")]
        assert_eq!(
            VectorAdder::with_backend(VectorBackend::Sse).backend(),
            VectorBackend::Portable
        );
        assert_eq!(
            VectorAdder::with_backend(VectorBackend::Portable).backend(),
            VectorBackend::Portable
        );
    }

    #[test]
    #[should_panic(expected = "output too short")]
    fn test_short_output_panics() {
        let mut r = vec![0.0; 3];
        add_vectorized(&mut r, &[1.0; 4], &[1.0; 4]);
    }
}
