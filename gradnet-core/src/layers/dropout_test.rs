use super::*;
use crate::utils::testing::check_tensor_near;

fn input(data: Vec<f32>) -> Tensor {
    let len = data.len();
    Tensor::new(data, vec![len]).unwrap()
}

fn param(drop_prob: f32) -> Param {
    Param::new().with("drop_prob", drop_prob)
}

#[test]
fn test_construction_requires_one_input() {
    let two = vec![input(vec![1.0]), input(vec![2.0])];
    let err = LayerDropout::new("drop", two, &param(0.5)).unwrap_err();
    assert_eq!(
        err,
        GradNetError::InputArityMismatch {
            layer: "drop".to_string(),
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_construction_requires_drop_prob() {
    let err = LayerDropout::new("drop", vec![input(vec![1.0])], &Param::new()).unwrap_err();
    assert_eq!(
        err,
        GradNetError::MissingParam {
            layer: "drop".to_string(),
            key: "drop_prob".to_string(),
        }
    );
}

#[test]
fn test_construction_rejects_out_of_range_prob() {
    for bad in [-0.1, 1.5] {
        let err = LayerDropout::new("drop", vec![input(vec![1.0])], &param(bad)).unwrap_err();
        assert_eq!(
            err,
            GradNetError::InvalidParam {
                layer: "drop".to_string(),
                key: "drop_prob".to_string(),
                value: bad,
            }
        );
    }
}

#[test]
fn test_zero_prob_passes_through_with_all_ones_mask() {
    let in0 = input(vec![1.5, -2.0, 0.0, 4.0]);
    let mut layer = LayerDropout::new("drop", vec![in0.clone()], &param(0.0)).unwrap();

    layer.forward(&State::train());
    check_tensor_near(&layer.outputs()[0], &[1.5, -2.0, 0.0, 4.0], 0.0);
    assert_eq!(layer.internal_tensors()[0].get_data(), vec![1.0; 4]);
}

#[test]
fn test_full_prob_zeroes_output_and_mask() {
    let in0 = input(vec![1.5, -2.0, 0.0, 4.0]);
    let mut layer = LayerDropout::new("drop", vec![in0], &param(1.0)).unwrap();

    layer.forward(&State::train());
    check_tensor_near(&layer.outputs()[0], &[0.0; 4], 0.0);
    assert_eq!(layer.internal_tensors()[0].get_data(), vec![0.0; 4]);
}

#[test]
fn test_non_train_phase_passes_through_and_leaves_mask() {
    let in0 = input(vec![3.0, -1.0]);
    let mut layer = LayerDropout::new("drop", vec![in0], &param(0.9)).unwrap();

    // Give the mask a recognizable prior state.
    layer.internal_tensors()[0].fill(7.0);

    layer.forward(&State::test());
    check_tensor_near(&layer.outputs()[0], &[3.0, -1.0], 0.0);
    assert_eq!(layer.internal_tensors()[0].get_data(), vec![7.0, 7.0]);
}

#[test]
fn test_general_case_drop_fraction_and_scale() {
    let numel = 10_000;
    let drop_prob = 0.4;
    let in0 = Tensor::new(vec![1.0; numel], vec![numel]).unwrap();
    let mut layer =
        LayerDropout::with_seed("drop", vec![in0], &param(drop_prob), 42).unwrap();

    layer.forward(&State::train());

    let mask = layer.internal_tensors()[0].get_data();
    let scale = 1.0 / (1.0 - drop_prob);
    let dropped = mask.iter().filter(|&&m| m == 0.0).count();
    for &m in &mask {
        assert!(m == 0.0 || m == scale, "mask element {} is neither 0 nor {}", m, scale);
    }
    let fraction = dropped as f32 / numel as f32;
    assert!(
        (fraction - drop_prob).abs() < 0.03,
        "dropped fraction {} too far from {}",
        fraction,
        drop_prob
    );

    // Output is the mask applied to the (all-ones) input.
    assert_eq!(layer.outputs()[0].get_data(), mask);
}

#[test]
fn test_seeded_masks_are_reproducible() {
    let make = || {
        let in0 = Tensor::new(vec![1.0; 64], vec![64]).unwrap();
        LayerDropout::with_seed("drop", vec![in0], &param(0.5), 7).unwrap()
    };
    let mut a = make();
    let mut b = make();
    a.forward(&State::train());
    b.forward(&State::train());
    assert_eq!(
        a.internal_tensors()[0].get_data(),
        b.internal_tensors()[0].get_data()
    );
}

#[test]
fn test_backward_accumulates_through_mask() {
    let in0 = input(vec![2.0, 3.0]);
    let mut layer = LayerDropout::new("drop", vec![in0.clone()], &param(0.0)).unwrap();

    layer.forward(&State::train()); // mask = [1, 1]
    layer.outputs()[0].write_data().deriv_mut().copy_from_slice(&[0.5, 1.5]);
    layer.backward(&State::train());

    // in_deriv = mask * out_deriv, mask_deriv = in * out_deriv
    assert_eq!(in0.get_deriv(), vec![0.5, 1.5]);
    assert_eq!(layer.internal_tensors()[0].get_deriv(), vec![1.0, 4.5]);

    layer.backward(&State::train());
    assert_eq!(in0.get_deriv(), vec![1.0, 3.0]);
    assert_eq!(layer.internal_tensors()[0].get_deriv(), vec![2.0, 9.0]);
}

#[test]
fn test_clear_deriv_covers_mask() {
    let in0 = input(vec![2.0, 3.0]);
    let mut layer = LayerDropout::new("drop", vec![in0], &param(0.0)).unwrap();

    layer.forward(&State::train());
    layer.outputs()[0].write_data().deriv_mut().fill(1.0);
    layer.backward(&State::train());
    assert_ne!(layer.internal_tensors()[0].get_deriv(), vec![0.0, 0.0]);

    layer.clear_deriv();
    assert_eq!(layer.outputs()[0].get_deriv(), vec![0.0, 0.0]);
    assert_eq!(layer.internal_tensors()[0].get_deriv(), vec![0.0, 0.0]);
}

#[test]
fn test_forward_never_touches_derivs() {
    let in0 = input(vec![1.0, 2.0]);
    let mut layer = LayerDropout::with_seed("drop", vec![in0.clone()], &param(0.5), 3).unwrap();

    in0.write_data().deriv_mut().copy_from_slice(&[9.0, 9.0]);
    layer.outputs()[0].write_data().deriv_mut().copy_from_slice(&[8.0, 8.0]);

    layer.forward(&State::train());
    assert_eq!(in0.get_deriv(), vec![9.0, 9.0]);
    assert_eq!(layer.outputs()[0].get_deriv(), vec![8.0, 8.0]);
}
