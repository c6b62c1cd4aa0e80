//! Manual 128-bit SIMD: four additions per loop iteration, scalar tail.

use kernels::KernelKind;

fn main() -> anyhow::Result<()> {
    cli::entrypoint(KernelKind::Vector)
}
