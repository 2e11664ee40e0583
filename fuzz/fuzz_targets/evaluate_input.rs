#![no_main]

use hypotest::evaluator::{evaluate, Tail, TestInput, TestKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (f64, f64, f64, u64, f64, u8)| {
    let (sample_mean, hypothesized_mean, dispersion, sample_size, alpha, tail) = data;
    let tail = Tail::ALL[tail as usize % 3];
    let input = TestInput::new(sample_mean, hypothesized_mean, dispersion, sample_size, alpha, tail);

    for kind in [TestKind::Z, TestKind::T] {
        if let Ok(result) = evaluate(kind, &input) {
            assert!((0.0..=1.0).contains(&result.p_value));

            // Outside rounding distance of the boundary both rules must agree
            if (result.p_value / alpha).ln().abs() > 1e-2 {
                assert_eq!(result.reject_null, result.p_value < alpha, "{input:?} {result:?}");
            }
        }
    }
});
