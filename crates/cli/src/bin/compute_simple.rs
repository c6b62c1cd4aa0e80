//! Scalar baseline: one addition per loop iteration.

use kernels::KernelKind;

fn main() -> anyhow::Result<()> {
    cli::entrypoint(KernelKind::Scalar)
}
