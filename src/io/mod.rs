//! Input/output helpers.
//!
//! - model artifact JSON read/write (`artifact`)

pub mod artifact;

pub use artifact::*;
