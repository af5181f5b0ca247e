use crate::error::GradNetError;
use crate::layers::{check_arity, Layer};
use crate::state::State;
use crate::tensor::{create, Tensor};

/// Rectified Linear Unit: `out[i] = max(0, in[i])`.
#[derive(Debug)]
pub struct LayerRelu {
    name: String,
    in_: Vec<Tensor>,
    out: Vec<Tensor>,
}

impl LayerRelu {
    pub fn new(name: &str, in_: Vec<Tensor>) -> Result<Self, GradNetError> {
        check_arity(name, &in_, 1)?;
        let out = vec![create::zeros(&in_[0].shape())?];
        Ok(LayerRelu {
            name: name.to_string(),
            in_,
            out,
        })
    }
}

impl Layer for LayerRelu {
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
        let in0 = self.in_[0].read_data();
        let mut out = self.out[0].write_data();
        for i in 0..out.data.len() {
            out.data[i] = if in0.data[i] > 0.0 { in0.data[i] } else { 0.0 };
        }
    }

    fn backward(&mut self, _state: &State) {
        let out_deriv = self.out[0].get_deriv();

        // in_deriv += out_deriv where the input was positive
        let mut in0 = self.in_[0].write_data();
        for i in 0..out_deriv.len() {
            if in0.data[i] > 0.0 {
                in0.deriv[i] += out_deriv[i];
            }
        }
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
