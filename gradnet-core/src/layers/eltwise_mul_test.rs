use super::*;
use crate::tensor::create::{ones, zeros};
use crate::utils::testing::check_tensor_near;

fn input(data: Vec<f32>) -> Tensor {
    let len = data.len();
    Tensor::new(data, vec![len]).unwrap()
}

#[test]
fn test_construction_requires_two_inputs() {
    let err = LayerEltwiseMul::new("mul", vec![input(vec![1.0])]).unwrap_err();
    assert_eq!(
        err,
        GradNetError::InputArityMismatch {
            layer: "mul".to_string(),
            expected: 2,
            actual: 1,
        }
    );

    let three = vec![input(vec![1.0]), input(vec![2.0]), input(vec![3.0])];
    let err = LayerEltwiseMul::new("mul", three).unwrap_err();
    assert_eq!(
        err,
        GradNetError::InputArityMismatch {
            layer: "mul".to_string(),
            expected: 2,
            actual: 3,
        }
    );
}

#[test]
fn test_construction_requires_equal_sizes() {
    let err = LayerEltwiseMul::new("mul", vec![input(vec![1.0, 2.0]), input(vec![1.0])])
        .unwrap_err();
    assert_eq!(
        err,
        GradNetError::InputSizeMismatch {
            layer: "mul".to_string(),
            left: 2,
            right: 1,
        }
    );
}

#[test]
fn test_forward() {
    let in0 = input(vec![2.0, 3.0, -1.0]);
    let in1 = input(vec![4.0, 0.0, 5.0]);
    let mut layer = LayerEltwiseMul::new("mul", vec![in0, in1]).unwrap();

    layer.forward(&State::train());
    check_tensor_near(&layer.outputs()[0], &[8.0, 0.0, -5.0], 0.0);
}

#[test]
fn test_backward_accumulates() {
    let in0 = input(vec![2.0, 3.0, -1.0]);
    let in1 = input(vec![4.0, 0.0, 5.0]);
    let mut layer = LayerEltwiseMul::new("mul", vec![in0.clone(), in1.clone()]).unwrap();

    layer.forward(&State::train());
    layer.outputs()[0].write_data().deriv_mut().fill(1.0);
    layer.backward(&State::train());

    // in0_deriv = in1 * out_deriv, in1_deriv = in0 * out_deriv
    assert_eq!(in0.get_deriv(), vec![4.0, 0.0, 5.0]);
    assert_eq!(in1.get_deriv(), vec![2.0, 3.0, -1.0]);

    // A second backward without clearing sums, not overwrites.
    layer.backward(&State::train());
    assert_eq!(in0.get_deriv(), vec![8.0, 0.0, 10.0]);
    assert_eq!(in1.get_deriv(), vec![4.0, 6.0, -2.0]);
}

#[test]
fn test_backward_with_aliased_inputs() {
    // The same tensor wired into both slots: square. d(x*x)/dx = 2x.
    let x = input(vec![3.0, -2.0]);
    let mut layer = LayerEltwiseMul::new("square", vec![x.clone(), x.clone()]).unwrap();

    layer.forward(&State::train());
    check_tensor_near(&layer.outputs()[0], &[9.0, 4.0], 0.0);

    layer.outputs()[0].write_data().deriv_mut().fill(1.0);
    layer.backward(&State::train());
    assert_eq!(x.get_deriv(), vec![6.0, -4.0]);
}

#[test]
fn test_clear_deriv() {
    let mut layer =
        LayerEltwiseMul::new("mul", vec![input(vec![1.0, 2.0]), input(vec![3.0, 4.0])]).unwrap();
    layer.forward(&State::train());
    layer.outputs()[0].write_data().deriv_mut().fill(5.0);

    layer.clear_deriv();
    assert_eq!(layer.outputs()[0].get_deriv(), vec![0.0, 0.0]);
}

#[test]
fn test_output_not_aliased_with_inputs() {
    let a = ones(&[2]).unwrap();
    let b = zeros(&[2]).unwrap();
    let layer = LayerEltwiseMul::new("mul", vec![a.clone(), b.clone()]).unwrap();
    assert!(!Tensor::ptr_eq(&layer.outputs()[0], &a));
    assert!(!Tensor::ptr_eq(&layer.outputs()[0], &b));
}
