//! 32-byte aligned `f32` storage for SIMD kernels.
//!
//! `Vec<f32>` only guarantees 4-byte alignment, which is not enough for
//! `_mm_load_ps` / `_mm_store_ps`. `AlignedBuffer` goes straight to the global
//! allocator with an explicit [`Layout`] and frees it in `Drop`.
//!
//! # Failure modes
//! - `n * size_of::<f32>()` overflowing `usize` -> `CapacityOverflow`
//! - size not representable as a layout (> `isize::MAX`) -> `InvalidLayout`
//! - allocator returning null -> `OutOfMemory`

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::fmt;
use std::mem::size_of;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use common::{AllocationError, AllocationResult};
use tracing::debug;

/// Base-address alignment of every [`AlignedBuffer`], in bytes.
pub const SIMD_ALIGNMENT: usize = 32;

/// Only its alignment is used: it seeds the dangling pointer of empty buffers.
#[allow(dead_code)]
#[repr(C, align(32))]
struct AlignBlock([u8; SIMD_ALIGNMENT]);

/// Owned, zero-initialised, 32-byte aligned array of `f32`.
///
/// Empty buffers never touch the allocator but still report an aligned
/// base address.
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
    layout: Option<Layout>,
}

// SAFETY: the buffer uniquely owns its allocation, like `Box<[f32]>`.
unsafe impl Send for AlignedBuffer {}
// SAFETY: shared access only hands out `&[f32]`.
unsafe impl Sync for AlignedBuffer {}

impl AlignedBuffer {
    /// Allocate `len` zeroed floats on a [`SIMD_ALIGNMENT`] boundary.
    ///
    /// # Errors
    /// See the module docs.
    pub fn zeroed(len: usize) -> AllocationResult<Self> {
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::<AlignBlock>::dangling().cast::<f32>(),
                len: 0,
                layout: None,
            });
        }

        let elem_size = size_of::<f32>();
        let size = len
            .checked_mul(elem_size)
            .ok_or(AllocationError::CapacityOverflow {
                count: len,
                elem_size,
            })?;
        let layout = Layout::from_size_align(size, SIMD_ALIGNMENT).map_err(|_| {
            AllocationError::InvalidLayout {
                size,
                align: SIMD_ALIGNMENT,
            }
        })?;

        // SAFETY: layout is valid and has non-zero size.
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw.cast::<f32>()).ok_or(AllocationError::OutOfMemory { size })?;

        debug!(
            elements = len,
            bytes = size,
            align = SIMD_ALIGNMENT,
            "allocated aligned buffer"
        );

        Ok(Self {
            ptr,
            len,
            layout: Some(layout),
        })
    }

    /// Allocate and fill with `f(i)` for every index.
    pub fn from_fn(len: usize, mut f: impl FnMut(usize) -> f32) -> AllocationResult<Self> {
        let mut buffer = Self::zeroed(len)?;
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = f(i);
        }
        Ok(buffer)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[f32] {
        // SAFETY: ptr is valid for `len` initialised floats (zeroed on alloc),
        // or dangling-but-aligned with len == 0.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Whether the base address is a multiple of `align` (a power of two).
    pub fn is_aligned_to(&self, align: usize) -> bool {
        debug_assert!(align.is_power_of_two());
        (self.ptr.as_ptr() as usize) % align == 0
    }

    /// Size of the backing allocation in bytes (0 for empty buffers).
    pub fn byte_len(&self) -> usize {
        self.layout.map_or(0, |l| l.size())
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl DerefMut for AlignedBuffer {
    fn deref_mut(&mut self) -> &mut [f32] {
        self.as_mut_slice()
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if let Some(layout) = self.layout.take() {
            // SAFETY: allocated in `zeroed` with exactly this layout, freed once.
            unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("bytes", &self.byte_len())
            .field("ptr", &self.ptr)
            .finish()
    }
}
