//! Mathematical utilities: dense linear solving.

pub mod lu;

pub use lu::*;
