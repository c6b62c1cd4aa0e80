use std::io;

use anyhow::Context;
use clap::Parser;
use common::{init_structured_logging, BenchError, BenchResult, LoggingConfig, OperationTimer};
use kernels::{
    fill_pattern, sample, vector_prefix_len, verify_sum, AlignedBuffer, CpuInfo, KernelKind,
};
use tracing::{debug, info};

use crate::args::{BenchArgs, RunConfig};
use crate::report::{RunReport, SAMPLE_LEN};

/// One benchmark run: allocate, fill, time a single compute call, verify.
///
/// Nothing is written to stdout here; the caller prints the report only after
/// the whole run succeeded.
pub fn run(config: &RunConfig) -> BenchResult<RunReport> {
    let n = config.element_count;

    let cpu = CpuInfo::detect();
    debug!(
        simd_level = ?cpu.simd_level,
        lanes = cpu.lane_width,
        cores = cpu.num_cores,
        logical_cores = cpu.num_logical_cores,
        "cpu info"
    );

    let mut data1 = AlignedBuffer::zeroed(n)?;
    let mut data2 = AlignedBuffer::zeroed(n)?;
    let mut result = AlignedBuffer::zeroed(n)?;

    fill_pattern(&mut data1, &mut data2);

    let adder = config.kernel.adder();
    if config.kernel == KernelKind::Vector {
        let tail = n - vector_prefix_len(n);
        if tail > 0 {
            debug!(tail, "table size is not a multiple of 4, tail handled by scalar fallback");
        }
    }

    // Замер только вокруг одного вызова вычисления
    let timer = OperationTimer::new(adder.name()).with_items(n as u64);
    adder.add(&mut result, &data1, &data2);
    let elapsed = timer.finish();

    if let Some(index) = verify_sum(&result, &data1, &data2) {
        return Err(BenchError::Verification {
            index,
            expected: data1[index] + data2[index],
            actual: result[index],
        });
    }

    info!(
        kernel = adder.name(),
        elements = n,
        seconds = elapsed.as_secs_f64(),
        "run finished"
    );

    Ok(RunReport {
        element_count: n,
        kernel: config.kernel,
        elapsed,
        sample: sample(&result, SAMPLE_LEN).to_vec(),
    })
}

/// Shared `main` of both binaries.
///
/// Usage errors are reported by clap (usage on stderr, exit 2); run failures
/// propagate as `anyhow` errors (exit 1) with nothing printed on stdout.
pub fn entrypoint(kernel: KernelKind) -> anyhow::Result<()> {
    let args = BenchArgs::parse();

    init_structured_logging(LoggingConfig::default())
        .context("failed to initialise logging")?;

    let config = args.into_config(kernel);
    let report = run(&config).with_context(|| {
        format!(
            "{:?} run over {} elements failed",
            config.kernel, config.element_count
        )
    })?;

    report
        .write_to(&mut io::stdout().lock())
        .context("failed to write report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(n: usize, kernel: KernelKind) -> RunConfig {
        RunConfig {
            element_count: n,
            kernel,
        }
    }

    #[test]
    fn test_run_eight_elements() {
        for kernel in [KernelKind::Scalar, KernelKind::Vector] {
            let report = run(&config(8, kernel)).unwrap();
            assert_eq!(report.element_count, 8);
            assert_eq!(report.kernel, kernel);
            assert_eq!(report.sample, vec![0.0, 3.0, 6.0, 9.0]);
        }
    }

    #[test]
    fn test_run_zero_elements() {
        let report = run(&config(0, KernelKind::Vector)).unwrap();
        assert!(report.sample.is_empty());
    }

    #[test]
    fn test_run_short_tables() {
        for n in 1..4 {
            let report = run(&config(n, KernelKind::Vector)).unwrap();
            let expected: Vec<f32> = (0..n).map(|i| 3.0 * i as f32).collect();
            assert_eq!(report.sample, expected);
        }
    }

    #[test]
    fn test_elapsed_is_finite_and_non_negative() {
        let report = run(&config(100_003, KernelKind::Vector)).unwrap();
        let secs = report.elapsed_secs();
        assert!(secs.is_finite());
        assert!(secs >= 0.0);
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        let err = run(&config(usize::MAX, KernelKind::Scalar)).unwrap_err();
        assert!(matches!(err, BenchError::Allocation(_)));
    }
}
