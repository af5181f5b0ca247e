// src/tensor/create.rs

use crate::error::GradNetError;
use crate::tensor::Tensor;

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, GradNetError> {
    let numel = shape.iter().product();
    let data_vec: Vec<f32> = vec![0.0; numel];
    Tensor::new(data_vec, shape.to_vec())
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, GradNetError> {
    let numel = shape.iter().product();
    let data_vec: Vec<f32> = vec![1.0; numel];
    Tensor::new(data_vec, shape.to_vec())
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, GradNetError> {
    let numel = shape.iter().product();
    let data_vec: Vec<f32> = vec![value; numel];
    Tensor::new(data_vec, shape.to_vec())
}

/// Creates a new tensor from a `Vec<f32>` and shape.
pub fn from_vec(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, GradNetError> {
    Tensor::new(data_vec, shape)
}

/// Creates a new zero tensor with the same shape as the input tensor.
///
/// The result shares nothing with `tensor`; its buffers are fresh. Used by
/// the solver for the previous-weight snapshots, which must match the live
/// weights in size but never alias them.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, GradNetError> {
    zeros(&tensor.shape())
}

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a tensor with elements drawn uniformly from `[0, 1)`.
pub fn rand(shape: &[usize]) -> Result<Tensor, GradNetError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f32> = (0..numel).map(|_| rng.gen::<f32>()).collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Creates a tensor with elements drawn from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Result<Tensor, GradNetError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(&mut rng)).collect();
    Tensor::new(data_vec, shape.to_vec())
}
