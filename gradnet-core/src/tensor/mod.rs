// src/tensor/mod.rs

use crate::error::GradNetError;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock};

pub mod create;

// Re-export creation functions to make them public
pub use create::{from_vec, full, ones, rand, randn, zeros, zeros_like};

/// A flat numeric buffer paired with a gradient buffer of identical shape.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared ownership:** the producing layer and every consuming layer
///     hold the same tensor without cloning the buffers (cheap clones).
/// 2.  **Interior mutability:** the producer writes `data` during forward,
///     consumers accumulate into `deriv` during backward, all through
///     shared handles.
///
/// The graph discipline is single-writer-per-phase: exactly one layer
/// produces a tensor's `data`; gradient contributions into `deriv` happen
/// during one serialized backward sweep.
#[derive(Clone)]
pub struct Tensor {
    /// Arc for shared ownership, RwLock for interior mutability of TensorData.
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new tensor with the given f32 data and shape.
    ///
    /// The gradient buffer is allocated immediately (zero-filled, same
    /// length as the data).
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradNetError> {
        let tensor_data = TensorData::new(data_vec, shape)?;
        Ok(Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        })
    }

    /// Returns a clone of the tensor's shape (`Vec<usize>`).
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape().to_vec()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// The lock is automatically released when the guard goes out of scope.
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> std::sync::RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    ///
    /// The lock is automatically released when the guard goes out of scope.
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Returns a snapshot of the value buffer as a `Vec<f32>`.
    pub fn get_data(&self) -> Vec<f32> {
        self.read_data().data().to_vec()
    }

    /// Returns a snapshot of the gradient buffer as a `Vec<f32>`.
    pub fn get_deriv(&self) -> Vec<f32> {
        self.read_data().deriv().to_vec()
    }

    /// Replaces the value buffer.
    ///
    /// # Errors
    /// Returns `GradNetError::TensorCreationError` if `data_vec` does not
    /// have the tensor's element count.
    pub fn set_data(&self, data_vec: Vec<f32>) -> Result<(), GradNetError> {
        let mut guard = self.write_data();
        if data_vec.len() != guard.numel() {
            return Err(GradNetError::TensorCreationError {
                data_len: data_vec.len(),
                shape: guard.shape().to_vec(),
            });
        }
        guard.data = data_vec;
        Ok(())
    }

    /// Copies the value buffer of `src` into this tensor.
    ///
    /// Both tensors must have the same element count; layers that use this
    /// (pass-through paths) guarantee that at construction time.
    pub fn copy_data_from(&self, src: &Tensor) {
        let src_data = src.get_data();
        self.write_data().data_mut().copy_from_slice(&src_data);
    }

    /// Sets every element of the value buffer to zero.
    pub fn zero(&self) {
        self.write_data().zero();
    }

    /// Sets every element of the gradient buffer to zero.
    pub fn zero_deriv(&self) {
        self.write_data().zero_deriv();
    }

    /// Sets every element of the value buffer to `value`.
    pub fn fill(&self, value: f32) {
        self.write_data().fill(value);
    }

    /// Whether two handles point at the same underlying buffers.
    pub fn ptr_eq(a: &Tensor, b: &Tensor) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }
}

impl std::fmt::Debug for Tensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.read_data();
        f.debug_struct("Tensor")
            .field("shape", &guard.shape)
            .field("data", &guard.data)
            .field("deriv", &guard.deriv)
            .finish()
    }
}
