//! I/O operations for relief
//!
//! This crate decodes grayscale heightmaps from common image formats,
//! writes triangle meshes as binary STL or Wavefront OBJ, and renders
//! the heightmap-derived normal-map and hillshade rasters to PNG.

pub mod heightmap;
pub mod obj;
pub mod shading;
pub mod stl;

pub use heightmap::read_heightmap;
pub use obj::write_obj;
pub use shading::{write_hillshade, write_normal_map};
pub use stl::write_stl;

use std::path::Path;

use relief_core::{Error, Result, TriangleMesh};

/// Write a mesh, selecting the format from the (case-insensitive) file
/// extension: `.stl` or `.obj`.
pub fn write_mesh<P: AsRef<Path>>(path: P, mesh: &TriangleMesh) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("stl") => stl::write_stl(path, mesh),
        Some("obj") => obj::write_obj(path, mesh),
        _ => Err(Error::UnsupportedFormat(format!(
            "cannot deduce mesh format from {:?} (expected .stl or .obj)",
            path
        ))),
    }
}
