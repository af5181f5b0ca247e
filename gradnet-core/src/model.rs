use crate::error::GradNetError;
use crate::tensor::Tensor;

/// The model collaborator driven by the solver.
///
/// A `Model` owns the layer wiring and the learnable tensors; the solver
/// only needs this narrow surface: run one training pass, run one test
/// pass, enumerate the weights, and persist itself. Concrete
/// implementations live with the embedding application (see
/// `tests/train_loop.rs` and the crate examples for small ones).
pub trait Model {
    /// The model identifier, used in diagnostics and checkpoint file names.
    fn name(&self) -> &str;

    /// Runs one full forward + backward pass over the layer graph and
    /// returns the scalar loss. After this call every weight tensor's
    /// gradient buffer holds the accumulated gradients for the step.
    fn train(&mut self) -> f32;

    /// Runs an evaluation pass and returns the scalar accuracy.
    fn test(&mut self) -> f32;

    /// Appends every learnable tensor to `out`, in a stable order.
    fn collect_weights(&self, out: &mut Vec<Tensor>);

    /// Persists the model to `path`. The serialization format is owned by
    /// the implementation.
    fn save(&self, path: &str) -> Result<(), GradNetError>;
}
