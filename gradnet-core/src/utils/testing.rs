use crate::tensor::Tensor;

/// Checks that a tensor's value buffer matches `expected_data` within
/// `tolerance`. Panics with the offending index on mismatch.
pub fn check_tensor_near(actual: &Tensor, expected_data: &[f32], tolerance: f32) {
    let actual_data = actual.get_data();

    assert_eq!(
        actual_data.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
