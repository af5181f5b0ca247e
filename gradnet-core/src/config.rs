use std::collections::HashMap;

/// Scalar configuration handed to layer constructors.
///
/// A flat string-keyed store; layers look up the keys they need at
/// construction time (e.g. `drop_prob` for dropout) and turn a missing or
/// out-of-range value into a `GradNetError` naming the layer. Parsing
/// configuration from files is owned by the embedding application, not by
/// this core.
#[derive(Debug, Default, Clone)]
pub struct Param {
    values: HashMap<String, f32>,
}

impl Param {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a scalar value for `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: f32) {
        self.values.insert(key.into(), value);
    }

    /// Builder-style variant of [`set`](Param::set).
    pub fn with(mut self, key: impl Into<String>, value: f32) -> Self {
        self.set(key, value);
        self
    }

    /// Looks up a scalar value.
    pub fn get(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }
}
