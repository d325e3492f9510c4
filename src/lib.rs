//! `ridgefit` library crate.
//!
//! Fits an L2-regularized linear model from rows of named numeric fields,
//! then evaluates it on new feature vectors. The pipeline is purely
//! functional, with immutable artifacts between stages:
//!
//! - `normalize` — per-feature mean/std stats, z-scoring
//! - `design` — normalized design matrix + raw target vector
//! - `math` — LU solve with partial pivoting
//! - `fit` — regularized normal equations, bias recovery, orchestration
//! - `model` — prediction (single vector and bulk)
//! - `io` — optional JSON artifact round trip
//!
//! There is no binary: the surrounding ingestion/UI layer is the caller's
//! concern; this crate is the numeric core only.

pub mod design;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod model;
pub mod normalize;
