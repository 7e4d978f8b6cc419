//! Dense tensor implementation
//!
//! Split by concern: the type itself, random creation, and shape operations
//! (including sample-axis matricization).

pub mod types;

mod creation;
mod shape_ops;

pub mod densend_traits;

pub use types::DenseND;
