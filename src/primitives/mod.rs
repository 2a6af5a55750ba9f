//! Core numeric containers (Vector, Matrix).
//!
//! These types carry posterior-draw matrices and pooled draw vectors
//! through the summarization pipeline.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
