//! Deterministic benchmark inputs and result checks.

/// Writes `a[i] = i` and `b[i] = 2 * i` (computed in `f32`).
///
/// # Panics
/// If the two slices differ in length.
pub fn fill_pattern(a: &mut [f32], b: &mut [f32]) {
    assert_eq!(a.len(), b.len(), "pattern buffers must have equal length");
    for (i, (x, y)) in a.iter_mut().zip(b.iter_mut()).enumerate() {
        let v = i as f32;
        *x = v;
        *y = v * 2.0;
    }
}

/// First index where `r[i]` is not bit-equal to `a[i] + b[i]`.
///
/// Only the first `a.len()` elements of `r` are inspected.
pub fn verify_sum(r: &[f32], a: &[f32], b: &[f32]) -> Option<usize> {
    r.iter()
        .zip(a)
        .zip(b)
        .position(|((&got, &x), &y)| got.to_bits() != (x + y).to_bits())
}

/// Leading `min(max, r.len())` values, used for the report line.
pub fn sample(r: &[f32], max: usize) -> &[f32] {
    &r[..max.min(r.len())]
}
