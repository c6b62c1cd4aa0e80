use crate::adder::{checked_len, Adder};

/// Per-element add, the baseline the vector path is compared against.
///
/// # Panics
/// If `b.len() != a.len()` or `r.len() < a.len()`.
pub fn add_scalar(r: &mut [f32], a: &[f32], b: &[f32]) {
    let n = checked_len(r, a, b);
    for ((out, &x), &y) in r[..n].iter_mut().zip(a).zip(b) {
        *out = x + y;
    }
}

/// Per-element loop, one addition per iteration.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScalarAdder;

impl Adder for ScalarAdder {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn add(&self, r: &mut [f32], a: &[f32], b: &[f32]) {
        add_scalar(r, a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_sum_eight() {
        let a: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let b: Vec<f32> = (0..8).map(|i| (i * 2) as f32).collect();
        let mut r = vec![0.0; 8];

        add_scalar(&mut r, &a, &b);
        assert_eq!(r, vec![0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0]);
    }

    #[test]
    fn test_scalar_empty() {
        let mut r: Vec<f32> = Vec::new();
        add_scalar(&mut r, &[], &[]);
        assert!(r.is_empty());
    }

    #[test]
    fn test_scalar_leaves_excess_output_untouched() {
        let mut r = vec![-1.0; 4];
        ScalarAdder.add(&mut r, &[1.0, 2.0], &[10.0, 20.0]);
        assert_eq!(r, vec![11.0, 22.0, -1.0, -1.0]);
    }

    #[test]
    #[should_panic(expected = "input length mismatch")]
    fn test_scalar_mismatched_lengths_panic() {
        let mut r = vec![0.0; 3];
        add_scalar(&mut r, &[1.0, 2.0, 3.0], &[1.0, 2.0]);
    }
}
