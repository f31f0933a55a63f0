//! Core data structures for relief
//!
//! This crate provides the fundamental types for heightmap-to-mesh
//! conversion: the immutable heightmap sampler with its preprocessing
//! filters, the triangle mesh container, and the solid-base builder
//! that closes a surface mesh into a printable prism.

pub mod base;
pub mod error;
pub mod heightmap;
pub mod mesh;

pub use base::*;
pub use error::*;
pub use heightmap::*;
pub use mesh::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector2, Vector3};

/// Common result type for relief operations
pub type Result<T> = std::result::Result<T, Error>;
