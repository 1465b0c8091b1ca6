//! Calendar helpers: date parsing, day kinds and session ordering

pub mod date;
pub mod ordering;

pub use date::*;
pub use ordering::*;
