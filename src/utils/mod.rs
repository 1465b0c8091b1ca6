//! Utility modules

pub mod mask;
pub mod memory_storage;
pub mod validation;

pub use mask::*;
pub use memory_storage::*;
pub use validation::*;
