//! Scheduling module: registries, sessions and the kennel that ties them together

pub mod dog;
pub mod kennel;
pub mod session;
pub mod walker;

pub use dog::*;
pub use kennel::*;
pub use session::*;
pub use walker::*;
