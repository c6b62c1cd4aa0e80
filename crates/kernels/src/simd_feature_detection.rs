//! SIMD Feature Detection
//!
//! Определяет, какой 128-битный backend доступен на текущем CPU:
//! - x86_64: SSE2 is part of the baseline ABI; SSE4.1 / AVX2 are reported
//!   for diagnostics only
//! - aarch64: NEON
//! - everything else: portable 4-lane loop
//!
//! Detection runs once per process (`Once` + atomics) and is logged at `info`.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Once;
use tracing::info;

use crate::simd::LANES;

static INIT: Once = Once::new();
static DETECTED_LEVEL: AtomicU8 = AtomicU8::new(0);

/// SIMD capability levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdLevel {
    None,
    Sse2,
    Sse41,
    Avx2,
    Neon,
}

/// CPU information relevant to the benchmark report.
#[derive(Debug, Clone)]
pub struct CpuInfo {
    pub simd_level: SimdLevel,
    pub vector_bits: u32,
    pub lane_width: usize,
    pub num_cores: usize,
    pub num_logical_cores: usize,
}

impl SimdLevel {
    /// Get best available SIMD level
    pub fn detect() -> Self {
        INIT.call_once(|| {
            let level = Self::probe();
            DETECTED_LEVEL.store(level.to_u8(), Ordering::Release);
            info!(simd_level = ?level, arch = std::env::consts::ARCH, "SIMD feature detection complete");
        });

        Self::from_u8(DETECTED_LEVEL.load(Ordering::Acquire))
    }

    #[cfg(target_arch = "x86_64")]
    fn probe() -> Self {
        if is_x86_feature_detected!("avx2") {
            SimdLevel::Avx2
        } else if is_x86_feature_detected!("sse4.1") {
            SimdLevel::Sse41
        } else if is_x86_feature_detected!("sse2") {
            SimdLevel::Sse2
        } else {
            SimdLevel::None
        }
    }

    #[cfg(target_arch = "aarch64")]
    fn probe() -> Self {
        if std::arch::is_aarch64_feature_detected!("neon") {
            SimdLevel::Neon
        } else {
            SimdLevel::None
        }
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn probe() -> Self {
        info!("Non-x86_64/aarch64 architecture - using portable 4-lane loop");
        SimdLevel::None
    }

    fn to_u8(self) -> u8 {
        match self {
            SimdLevel::None => 0,
            SimdLevel::Sse2 => 1,
            SimdLevel::Sse41 => 2,
            SimdLevel::Avx2 => 3,
            SimdLevel::Neon => 4,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => SimdLevel::Sse2,
            2 => SimdLevel::Sse41,
            3 => SimdLevel::Avx2,
            4 => SimdLevel::Neon,
            _ => SimdLevel::None,
        }
    }
}

impl CpuInfo {
    pub fn detect() -> Self {
        Self {
            simd_level: SimdLevel::detect(),
            vector_bits: 128,
            lane_width: LANES,
            num_cores: num_cpus::get_physical(),
            num_logical_cores: num_cpus::get(),
        }
    }
}
