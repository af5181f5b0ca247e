// src/tensor_data.rs

use crate::error::GradNetError;

/// Internal storage and metadata for a [`Tensor`](crate::tensor::Tensor).
///
/// Holds the value buffer and the gradient buffer side by side. It is
/// wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct to allow
/// shared ownership (one producer layer, any number of consumer layers)
/// and interior mutability.
///
/// Invariant: `deriv` is always allocated and always the same length as
/// `data`. The gradient buffer accumulates across a backward sweep and is
/// only reset by [`zero_deriv`](TensorData::zero_deriv).
#[derive(Debug, Clone)]
pub struct TensorData {
    /// The shape (dimensions) of the tensor.
    pub(crate) shape: Vec<usize>,
    /// The value buffer, in flattened row-major order.
    pub(crate) data: Vec<f32>,
    /// The gradient buffer, same length as `data`.
    pub(crate) deriv: Vec<f32>,
}

impl TensorData {
    /// Creates a new `TensorData` with the given data and shape.
    ///
    /// The gradient buffer is allocated immediately, zero-filled and
    /// `data`-length, so every tensor can participate in a backward pass.
    ///
    /// # Errors
    /// Returns `GradNetError::TensorCreationError` if the length of
    /// `data_vec` does not match the number of elements `shape` describes.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradNetError> {
        let numel: usize = shape.iter().product();
        let data_len = data_vec.len();
        if data_len != numel {
            return Err(GradNetError::TensorCreationError { data_len, shape });
        }

        Ok(TensorData {
            shape,
            deriv: vec![0.0; data_len],
            data: data_vec,
        })
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Returns the shape of the tensor.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Immutable view of the value buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable view of the value buffer.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Immutable view of the gradient buffer.
    pub fn deriv(&self) -> &[f32] {
        &self.deriv
    }

    /// Mutable view of the gradient buffer.
    pub fn deriv_mut(&mut self) -> &mut [f32] {
        &mut self.deriv
    }

    /// Sets every element of the value buffer to zero.
    pub fn zero(&mut self) {
        self.data.fill(0.0);
    }

    /// Sets every element of the gradient buffer to zero.
    pub fn zero_deriv(&mut self) {
        self.deriv.fill(0.0);
    }

    /// Sets every element of the value buffer to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }
}
