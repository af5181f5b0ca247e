//! Layers of the computation graph.
//!
//! Every layer consumes shared input tensors, owns its output tensors and
//! implements a hand-derived forward/backward pair. Input arity and shape
//! relationships are fixed per layer variant and validated once, at
//! construction; the hot paths never re-check them.

use crate::config::Param;
use crate::error::GradNetError;
use crate::state::State;
use crate::tensor::Tensor;
use std::fmt::Debug;

pub mod dropout;
pub mod eltwise_mul;
pub mod relu;

pub use dropout::LayerDropout;
pub use eltwise_mul::LayerEltwiseMul;
pub use relu::LayerRelu;

/// Capability interface shared by every layer variant.
pub trait Layer: Debug + Send + Sync {
    /// The layer name, unique within a model, used in diagnostics.
    fn name(&self) -> &str;

    /// The input tensors, in wiring order. Shared with their producers.
    fn inputs(&self) -> &[Tensor];

    /// The output tensors, owned by this layer and reused across steps.
    fn outputs(&self) -> &[Tensor];

    /// Layer-private tensors whose gradient buffers this layer owns
    /// (e.g. the dropout mask). Empty for most layers.
    fn internal_tensors(&self) -> &[Tensor] {
        &[]
    }

    /// Forward pass: reads the inputs' `data`, writes the outputs' `data`.
    ///
    /// A pure function of the inputs, any layer-local stochastic state and
    /// `state.phase`. Must not touch any gradient buffer.
    fn forward(&mut self, state: &State);

    /// Backward pass: reads the inputs' `data` and the outputs' `deriv`,
    /// accumulates (adds into, never overwrites) the inputs' `deriv` and
    /// the `deriv` of any internal tensor. Accumulation is required
    /// because a tensor feeding several consumers sums one gradient term
    /// per consumer.
    fn backward(&mut self, state: &State);

    /// Zeroes the gradient buffer of every tensor this layer owns: all
    /// outputs plus all internal tensors. Called once per training step
    /// before a new backward sweep.
    fn clear_deriv(&self) {
        for out in self.outputs() {
            out.zero_deriv();
        }
        for t in self.internal_tensors() {
            t.zero_deriv();
        }
    }
}

/// Validates a layer's input arity at construction time.
pub(crate) fn check_arity(
    layer: &str,
    inputs: &[Tensor],
    expected: usize,
) -> Result<(), GradNetError> {
    if inputs.len() != expected {
        return Err(GradNetError::InputArityMismatch {
            layer: layer.to_string(),
            expected,
            actual: inputs.len(),
        });
    }
    Ok(())
}

/// Tag identifying a layer variant, used by the [`build`] factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Dropout,
    EltwiseMul,
    Relu,
}

impl std::str::FromStr for LayerKind {
    type Err = GradNetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dropout" => Ok(LayerKind::Dropout),
            "eltwise_mul" => Ok(LayerKind::EltwiseMul),
            "relu" => Ok(LayerKind::Relu),
            other => Err(GradNetError::UnknownLayerKind(other.to_string())),
        }
    }
}

/// Builds a layer from a kind tag, inputs and configuration.
///
/// This is the factory the model builder goes through when wiring a graph
/// from a description rather than from code.
pub fn build(
    kind: LayerKind,
    name: &str,
    inputs: Vec<Tensor>,
    param: &Param,
) -> Result<Box<dyn Layer>, GradNetError> {
    match kind {
        LayerKind::Dropout => Ok(Box::new(LayerDropout::new(name, inputs, param)?)),
        LayerKind::EltwiseMul => Ok(Box::new(LayerEltwiseMul::new(name, inputs)?)),
        LayerKind::Relu => Ok(Box::new(LayerRelu::new(name, inputs)?)),
    }
}
