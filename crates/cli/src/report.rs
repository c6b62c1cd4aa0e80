use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use kernels::KernelKind;

/// How many leading result values the report shows.
pub const SAMPLE_LEN: usize = 4;

/// Outcome of one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub element_count: usize,
    pub kernel: KernelKind,
    pub elapsed: Duration,
    /// First `min(SAMPLE_LEN, n)` result values.
    pub sample: Vec<f32>,
}

impl RunReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")?;
        out.flush()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Using a table of {} floats", self.element_count)?;
        writeln!(
            f,
            "{} {:.6} seconds",
            self.kernel.timing_label(),
            self.elapsed_secs()
        )?;

        let values: Vec<String> = self.sample.iter().map(|v| format!("{v:?}")).collect();
        writeln!(f, "{}", values.join(" "))
    }
}
