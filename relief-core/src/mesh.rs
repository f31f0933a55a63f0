//! Mesh data structures and functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A triangle mesh with vertices, faces, and optional per-vertex UVs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub uvs: Option<Vec<[f32; 2]>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            uvs: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            uvs: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                let n = (v1 - v0).cross(&(v2 - v0));
                let len = n.norm();
                if len > 0.0 {
                    n / len
                } else {
                    Vector3f::zeros()
                }
            })
            .collect()
    }

    /// Scale every vertex componentwise
    pub fn scale(&mut self, factor: Vector3f) {
        for v in &mut self.vertices {
            v.x *= factor.x;
            v.y *= factor.y;
            v.z *= factor.z;
        }
    }

    /// Map a pixel-indexed mesh onto the requested physical size: the
    /// XY footprint is stretched to `x_size x y_size` and elevations are
    /// multiplied by `z_scale`.
    ///
    /// The pixel footprint is taken from the vertex extents; a grid
    /// whose X coordinates span `0..=max_x` is `max_x + 1` pixels wide.
    pub fn rescale(&mut self, x_size: f32, y_size: f32, z_scale: f32) {
        if self.vertices.is_empty() {
            return;
        }
        let mut max_x = 0.0f32;
        let mut max_y = 0.0f32;
        for v in &self.vertices {
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }
        self.scale(Vector3f::new(
            x_size / (max_x + 1.0),
            y_size / (max_y + 1.0),
            z_scale,
        ));
    }

    /// Assign UVs from the vertex XY positions, normalized by the mesh's
    /// physical footprint. Call after the final rescaling pass so that
    /// `(x, y)` already spans `[0, x_size] x [0, y_size]`.
    pub fn generate_grid_uvs(&mut self, x_size: f32, y_size: f32) {
        let uvs = self
            .vertices
            .iter()
            .map(|v| [v.x / x_size, v.y / y_size])
            .collect();
        self.uvs = Some(uvs);
    }

    /// Set per-vertex UVs
    pub fn set_uvs(&mut self, uvs: Vec<[f32; 2]>) {
        if uvs.len() == self.vertices.len() {
            self.uvs = Some(uvs);
        }
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.uvs = None;
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_quad() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
                Point3f::new(2.0, 2.0, 0.0),
                Point3f::new(0.0, 2.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = make_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_face_normals_point_up() {
        let mesh = make_quad();
        for n in mesh.calculate_face_normals() {
            assert!((n.z - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_degenerate_face_normal_is_zero() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        assert_eq!(mesh.calculate_face_normals()[0], Vector3f::zeros());
    }

    #[test]
    fn test_scale() {
        let mut mesh = make_quad();
        mesh.scale(Vector3f::new(0.5, 2.0, 3.0));
        assert_eq!(mesh.vertices[1], Point3f::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[2], Point3f::new(1.0, 4.0, 0.0));
    }

    #[test]
    fn test_rescale_to_physical_size() {
        // the quad spans 0..=2 in X and Y, a 3x3-pixel footprint
        let mut mesh = make_quad();
        mesh.vertices[2].z = 0.5;
        mesh.rescale(30.0, 60.0, 2.0);
        assert_eq!(mesh.vertices[1], Point3f::new(20.0, 0.0, 0.0));
        assert_eq!(mesh.vertices[2], Point3f::new(20.0, 40.0, 1.0));
        assert_eq!(mesh.vertices[3], Point3f::new(0.0, 40.0, 0.0));
    }

    #[test]
    fn test_rescale_empty_mesh_is_noop() {
        let mut mesh = TriangleMesh::new();
        mesh.rescale(10.0, 10.0, 1.0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_generate_grid_uvs() {
        let mut mesh = make_quad();
        mesh.generate_grid_uvs(2.0, 2.0);
        let uvs = mesh.uvs.as_ref().unwrap();
        assert_eq!(uvs[0], [0.0, 0.0]);
        assert_eq!(uvs[2], [1.0, 1.0]);
    }

    #[test]
    fn test_set_uvs_rejects_wrong_length() {
        let mut mesh = make_quad();
        mesh.set_uvs(vec![[0.0, 0.0]]);
        assert!(mesh.uvs.is_none());
    }
}
