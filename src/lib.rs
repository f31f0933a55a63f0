//! # relief
//!
//! Error-bounded conversion of grayscale heightmaps into triangle meshes.
//!
//! This is the umbrella crate that provides convenient access to all relief
//! functionality. You can use this crate to get everything in one place, or
//! use individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Heightmap and mesh data structures, preprocessing filters,
//!   and the solid-base builder
//! - **Triangulation**: Greedy incremental Delaunay refinement with a
//!   bounded per-pixel vertical error
//! - **I/O**: Heightmap decoding plus STL, OBJ, normal-map, and hillshade
//!   writers
//!
//! ## Quick Start
//!
//! ```no_run
//! use relief::prelude::*;
//!
//! // Load a heightmap and refine it down to 0.1% vertical error
//! let hm = read_heightmap("terrain.png")?;
//! let mut triangulator = Triangulator::new(&hm)?;
//! triangulator.run(0.001, 0, 0);
//!
//! // Write the surface as a binary STL
//! write_mesh("terrain.stl", &triangulator.mesh())?;
//! # Ok::<(), relief::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables triangulation and io
//! - `triangulation`: The greedy Delaunay refiner
//! - `io`: File format support

// Re-export core functionality
pub use relief_core::*;

// Re-export sub-crates
#[cfg(feature = "triangulation")]
pub use relief_triangulation as triangulation;

#[cfg(feature = "io")]
pub use relief_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use relief_core::{add_base, Error, Heightmap, Result, TriangleMesh};

    #[cfg(feature = "triangulation")]
    pub use relief_triangulation::Triangulator;

    #[cfg(feature = "io")]
    pub use relief_io::{read_heightmap, write_hillshade, write_mesh, write_normal_map};
}
