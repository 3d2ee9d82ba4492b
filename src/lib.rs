pub mod config;
pub mod estimate;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use estimate::{evaluate, evaluate_default, Estimate, EstimateError};
