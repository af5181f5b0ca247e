use crate::error::GradNetError;
use crate::layers::{check_arity, Layer};
use crate::state::State;
use crate::tensor::{create, Tensor};

/// Element wise multiplication (Hadamard product).
///
/// Takes exactly 2 inputs of identical size and produces 1 output of that
/// size: `out[i] = in0[i] * in1[i]`.
#[derive(Debug)]
pub struct LayerEltwiseMul {
    name: String,
    in_: Vec<Tensor>,
    out: Vec<Tensor>,
}

impl LayerEltwiseMul {
    /// Creates the layer, validating arity and input sizes.
    ///
    /// # Errors
    /// `InputArityMismatch` unless exactly 2 inputs are given;
    /// `InputSizeMismatch` unless both inputs have the same element count.
    pub fn new(name: &str, in_: Vec<Tensor>) -> Result<Self, GradNetError> {
        check_arity(name, &in_, 2)?;
        let left = in_[0].numel();
        let right = in_[1].numel();
        if left != right {
            return Err(GradNetError::InputSizeMismatch {
                layer: name.to_string(),
                left,
                right,
            });
        }

        // One output, same size as the inputs
        let out = vec![create::zeros(&in_[0].shape())?];

        Ok(LayerEltwiseMul {
            name: name.to_string(),
            in_,
            out,
        })
    }
}

impl Layer for LayerEltwiseMul {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &[Tensor] {
        &self.in_
    }

    fn outputs(&self) -> &[Tensor] {
        &self.out
    }

    fn forward(&mut self, _state: &State) {
        // Snapshots keep the pass lock-safe when one tensor is wired into
        // both input slots.
        let in0_data = self.in_[0].get_data();
        let in1_data = self.in_[1].get_data();
        let mut out = self.out[0].write_data();

        // out = in0 . in1 ("." = Hadamard product)
        for i in 0..out.data.len() {
            out.data[i] = in0_data[i] * in1_data[i];
        }
    }

    fn backward(&mut self, _state: &State) {
        // Snapshot the operands, then take the write locks one at a time.
        // The same tensor may be wired into both input slots; sequential
        // accumulation sums both product-rule terms into it.
        let out_deriv = self.out[0].get_deriv();
        let in0_data = self.in_[0].get_data();
        let in1_data = self.in_[1].get_data();

        // in0_deriv += in1 * out_deriv
        {
            let mut in0 = self.in_[0].write_data();
            for i in 0..out_deriv.len() {
                in0.deriv[i] += in1_data[i] * out_deriv[i];
            }
        }

        // in1_deriv += in0 * out_deriv
        {
            let mut in1 = self.in_[1].write_data();
            for i in 0..out_deriv.len() {
                in1.deriv[i] += in0_data[i] * out_deriv[i];
            }
        }
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "eltwise_mul_test.rs"]
mod tests;
