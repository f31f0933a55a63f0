//! Greedy Delaunay refinement of heightmaps
//!
//! This crate converts a rectangular grid of elevation samples into a
//! triangulated surface whose pointwise vertical error is bounded. It
//! maintains an incremental Delaunay triangulation whose vertices are
//! all exact sample points, and repeatedly inserts the sample with the
//! worst deviation from the current surface until a termination bound
//! is reached (the Garland-Heckbert greedy insertion strategy).

mod predicates;
mod triangulator;

pub use relief_core::MAX_DIMENSION;
pub use triangulator::Triangulator;
