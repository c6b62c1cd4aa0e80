#![no_main]

use arbitrary::Arbitrary;
use kernels::{add_scalar, Adder, AlignedBuffer, VectorAdder, VectorBackend};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct VectorAddInput {
    a: Vec<f32>,
    b: Vec<f32>,
    /// Starting offset into the inputs, to hit the unaligned SSE path.
    offset: u8,
    /// Extra output slots past `n` that must stay untouched.
    slack: u8,
}

fuzz_target!(|input: VectorAddInput| {
    let n = input.a.len().min(input.b.len());
    let offset = (input.offset as usize % 4).min(n);
    let a = &input.a[offset..n];
    let b = &input.b[offset..n];
    let len = a.len();
    let slack = input.slack as usize % 8;

    let mut expected = vec![f32::from_bits(0x7fc0_dead); len + slack];
    add_scalar(&mut expected, a, b);

    for backend in [VectorBackend::Sse, VectorBackend::Neon, VectorBackend::Portable] {
        let adder = VectorAdder::with_backend(backend);
        let mut got = vec![f32::from_bits(0x7fc0_dead); len + slack];
        adder.add(&mut got, a, b);
        check_same(&expected, &got, adder.name());
    }

    // Aligned storage must behave exactly like plain Vec storage
    let Ok(mut aligned_a) = AlignedBuffer::zeroed(len) else { return };
    let Ok(mut aligned_b) = AlignedBuffer::zeroed(len) else { return };
    let Ok(mut aligned_r) = AlignedBuffer::zeroed(len) else { return };
    aligned_a.copy_from_slice(a);
    aligned_b.copy_from_slice(b);
    VectorAdder::detect().add(&mut aligned_r, &aligned_a, &aligned_b);
    check_same(&expected[..len], &aligned_r, "aligned");
});

/// Bit-equal, except that any NaN matches any NaN: operand order inside the
/// scalar add is up to the compiler, which can change the propagated payload.
fn check_same(expected: &[f32], got: &[f32], who: &str) {
    assert_eq!(expected.len(), got.len());
    for (i, (e, g)) in expected.iter().zip(got).enumerate() {
        let same = e.to_bits() == g.to_bits() || (e.is_nan() && g.is_nan());
        assert!(same, "{who}: mismatch at {i}: {e:?} vs {g:?}");
    }
}
