/// Execution phase for a forward/backward pass.
///
/// Layers with phase-dependent behavior (dropout) branch on this; all
/// other layers ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Training pass: stochastic layers are active.
    Train,
    /// Inference/test pass: stochastic layers pass values through.
    Test,
}

/// Per-call execution state handed to every `forward`/`backward` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub phase: Phase,
}

impl State {
    /// State for a training pass.
    pub fn train() -> Self {
        State {
            phase: Phase::Train,
        }
    }

    /// State for an inference/test pass.
    pub fn test() -> Self {
        State { phase: Phase::Test }
    }
}
