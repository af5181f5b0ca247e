// Declare the main modules of the crate
pub mod config;
pub mod error;
pub mod layers;
pub mod model;
pub mod solver;
pub mod state;
pub mod tensor;
pub mod tensor_data;
pub mod utils;

// Re-export the core types so they are accessible directly via `gradnet_core::Tensor`
pub use error::GradNetError;
pub use model::Model;
pub use state::{Phase, State};
pub use tensor::Tensor;
