use crate::config::Param;
use crate::error::GradNetError;
use crate::layers::{check_arity, Layer};
use crate::state::{Phase, State};
use crate::tensor::{create, Tensor};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Dropout with inverted scaling.
///
/// During training each element is dropped with probability `drop_prob`;
/// survivors are scaled by `1 / (1 - drop_prob)` so the expected
/// activation magnitude is preserved. Outside the training phase the
/// layer passes values through unchanged.
///
/// The boundary probabilities are handled by explicit branches rather
/// than the general random path: at `drop_prob ≈ 0` the scale would be a
/// division by near-zero complement for no effect, at `drop_prob ≈ 1` it
/// would be unbounded.
#[derive(Debug)]
pub struct LayerDropout {
    name: String,
    in_: Vec<Tensor>,
    out: Vec<Tensor>,
    /// Per-element keep/drop mask; 0 for dropped elements, the inverse
    /// scale for kept ones.
    mask: Tensor,
    /// Probability to drop.
    drop_prob: f32,
    /// Seeded engine for deterministic masks. `None` draws from a fresh
    /// thread rng on every forward call.
    rng: Option<StdRng>,
}

impl LayerDropout {
    /// Creates the layer, reading `drop_prob` from `param`.
    ///
    /// # Errors
    /// `InputArityMismatch` unless exactly 1 input is given;
    /// `MissingParam` if `drop_prob` is absent; `InvalidParam` if it lies
    /// outside `[0, 1]`.
    pub fn new(name: &str, in_: Vec<Tensor>, param: &Param) -> Result<Self, GradNetError> {
        check_arity(name, &in_, 1)?;

        let drop_prob = param
            .get("drop_prob")
            .ok_or_else(|| GradNetError::MissingParam {
                layer: name.to_string(),
                key: "drop_prob".to_string(),
            })?;
        if !(0.0..=1.0).contains(&drop_prob) {
            return Err(GradNetError::InvalidParam {
                layer: name.to_string(),
                key: "drop_prob".to_string(),
                value: drop_prob,
            });
        }

        // The mask and the single output are both input-sized.
        let mask = create::zeros(&in_[0].shape())?;
        let out = vec![create::zeros(&in_[0].shape())?];

        Ok(LayerDropout {
            name: name.to_string(),
            in_,
            out,
            mask,
            drop_prob,
            rng: None,
        })
    }

    /// Like [`new`](LayerDropout::new) but with a seeded random engine, so
    /// successive forward calls draw a reproducible mask sequence.
    pub fn with_seed(
        name: &str,
        in_: Vec<Tensor>,
        param: &Param,
        seed: u64,
    ) -> Result<Self, GradNetError> {
        let mut layer = Self::new(name, in_, param)?;
        layer.rng = Some(StdRng::seed_from_u64(seed));
        Ok(layer)
    }
}

fn sample_mask<R: Rng>(rng: &mut R, numel: usize, drop_prob: f32, scale: f32) -> Vec<f32> {
    let dist = Uniform::new(0.0f32, 1.0);
    (0..numel)
        .map(|_| {
            if dist.sample(rng) < drop_prob {
                0.0
            } else {
                scale
            }
        })
        .collect()
}

impl Layer for LayerDropout {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &[Tensor] {
        &self.in_
    }

    fn outputs(&self) -> &[Tensor] {
        &self.out
    }

    fn internal_tensors(&self) -> &[Tensor] {
        std::slice::from_ref(&self.mask)
    }

    fn forward(&mut self, state: &State) {
        if state.phase != Phase::Train {
            // Dropout only during the training phase
            self.out[0].copy_data_from(&self.in_[0]);
            return;
        }

        // out = mask * in
        if self.drop_prob < f32::EPSILON {
            // Nothing to drop: just copy the input to the output
            self.out[0].copy_data_from(&self.in_[0]);
            self.mask.fill(1.0);
        } else if self.drop_prob > 1.0 - f32::EPSILON {
            // Drop everything: zero out the data
            self.out[0].zero();
            self.mask.zero();
        } else {
            let numel = self.mask.numel();
            let scale = 1.0 / (1.0 - self.drop_prob);
            let mask_vals = match self.rng.as_mut() {
                Some(rng) => sample_mask(rng, numel, self.drop_prob, scale),
                None => sample_mask(&mut rand::thread_rng(), numel, self.drop_prob, scale),
            };

            {
                let mut mask = self.mask.write_data();
                mask.data.copy_from_slice(&mask_vals);
            }

            let in0 = self.in_[0].read_data();
            let mask = self.mask.read_data();
            let mut out = self.out[0].write_data();
            for i in 0..out.data.len() {
                out.data[i] = mask.data[i] * in0.data[i];
            }
        }
    }

    fn backward(&mut self, _state: &State) {
        let out_deriv = self.out[0].get_deriv();
        let in_data = self.in_[0].get_data();
        let mask_data = self.mask.get_data();

        // in_deriv   += mask * out_deriv
        // mask_deriv += in * out_deriv
        {
            let mut in0 = self.in_[0].write_data();
            for i in 0..out_deriv.len() {
                in0.deriv[i] += mask_data[i] * out_deriv[i];
            }
        }
        {
            let mut mask = self.mask.write_data();
            for i in 0..out_deriv.len() {
                mask.deriv[i] += in_data[i] * out_deriv[i];
            }
        }
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "dropout_test.rs"]
mod tests;
