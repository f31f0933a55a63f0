//! Solid-base builder
//!
//! Closes an open heightmap surface into a printable prism by extruding
//! the rectangular perimeter down to a fixed elevation and capping the
//! bottom.

use crate::mesh::{Point3f, TriangleMesh};

/// Wrap a heightmap surface mesh in a closed solid whose bottom sits at
/// elevation `z`.
///
/// `width` and `height` are the heightmap dimensions; the mesh vertices
/// must still be in pixel units (XY in `[0, width-1] x [0, height-1]`),
/// so this runs before any rescaling pass. The surface must span the
/// full rectangle, which the triangulation guarantees. The result is
/// edge-manifold: every edge is shared by exactly two faces.
pub fn add_base(mesh: &mut TriangleMesh, width: usize, height: usize, z: f32) {
    let x1 = (width - 1) as f32;
    let y1 = (height - 1) as f32;

    // perimeter vertices of each side, ordered along the ccw boundary
    // loop (0,0) -> (x1,0) -> (x1,y1) -> (0,y1) -> (0,0)
    let mut bottom_side = Vec::new();
    let mut right_side = Vec::new();
    let mut top_side = Vec::new();
    let mut left_side = Vec::new();
    for (i, v) in mesh.vertices.iter().enumerate() {
        if v.y == 0.0 {
            bottom_side.push(i);
        }
        if v.x == x1 {
            right_side.push(i);
        }
        if v.y == y1 {
            top_side.push(i);
        }
        if v.x == 0.0 {
            left_side.push(i);
        }
    }
    let by = |mesh: &TriangleMesh, i: usize, axis: usize| match axis {
        0 => mesh.vertices[i].x,
        _ => mesh.vertices[i].y,
    };
    bottom_side.sort_by(|&a, &b| by(mesh, a, 0).total_cmp(&by(mesh, b, 0)));
    right_side.sort_by(|&a, &b| by(mesh, a, 1).total_cmp(&by(mesh, b, 1)));
    top_side.sort_by(|&a, &b| by(mesh, b, 0).total_cmp(&by(mesh, a, 0)));
    left_side.sort_by(|&a, &b| by(mesh, b, 1).total_cmp(&by(mesh, a, 1)));

    // bottom corners, one under each top corner
    let b00 = mesh.add_vertex(Point3f::new(0.0, 0.0, z));
    let b10 = mesh.add_vertex(Point3f::new(x1, 0.0, z));
    let b11 = mesh.add_vertex(Point3f::new(x1, y1, z));
    let b01 = mesh.add_vertex(Point3f::new(0.0, y1, z));

    // side walls, each fanned from the bottom corner at the side's start
    for (side, start, end) in [
        (&bottom_side, b00, b10),
        (&right_side, b10, b11),
        (&top_side, b11, b01),
        (&left_side, b01, b00),
    ] {
        for pair in side.windows(2) {
            mesh.add_face([start, pair[1], pair[0]]);
        }
        mesh.add_face([start, end, *side.last().unwrap()]);
    }

    // bottom cap, facing down
    mesh.add_face([b00, b11, b10]);
    mesh.add_face([b00, b01, b11]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Naive full tessellation of a size x size pixel grid.
    fn make_grid_mesh(size: usize) -> TriangleMesh {
        let mut vertices = Vec::new();
        for y in 0..size {
            for x in 0..size {
                vertices.push(Point3f::new(x as f32, y as f32, 0.5));
            }
        }
        let mut faces = Vec::new();
        for y in 0..(size - 1) {
            for x in 0..(size - 1) {
                let tl = y * size + x;
                let tr = tl + 1;
                let bl = (y + 1) * size + x;
                let br = bl + 1;
                faces.push([tl, tr, br]);
                faces.push([tl, br, bl]);
            }
        }
        TriangleMesh::from_vertices_and_faces(vertices, faces)
    }

    fn edge_counts(mesh: &TriangleMesh) -> HashMap<(usize, usize), usize> {
        let mut edges = HashMap::new();
        for face in &mesh.faces {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        edges
    }

    #[test]
    fn test_base_is_edge_manifold() {
        let mut mesh = make_grid_mesh(3);
        add_base(&mut mesh, 3, 3, -1.0);
        for (&(a, b), &count) in &edge_counts(&mesh) {
            assert_eq!(count, 2, "edge ({a}, {b}) shared by {count} faces");
        }
    }

    #[test]
    fn test_base_face_and_vertex_counts() {
        let mut mesh = make_grid_mesh(3);
        let faces_before = mesh.face_count();
        add_base(&mut mesh, 3, 3, -1.0);
        assert_eq!(mesh.vertex_count(), 9 + 4);
        // each side contributes one wall face per perimeter vertex, plus
        // the two bottom faces
        assert_eq!(mesh.face_count(), faces_before + 4 * 3 + 2);
    }

    #[test]
    fn test_bottom_sits_at_requested_elevation() {
        let mut mesh = make_grid_mesh(3);
        add_base(&mut mesh, 3, 3, -2.5);
        let lowest = mesh
            .vertices
            .iter()
            .map(|v| v.z)
            .fold(f32::INFINITY, f32::min);
        assert_eq!(lowest, -2.5);
    }

    #[test]
    fn test_walls_face_outward() {
        let mut mesh = make_grid_mesh(3);
        let faces_before = mesh.face_count();
        add_base(&mut mesh, 3, 3, -1.0);
        let normals = mesh.calculate_face_normals();
        // wall faces on the y = 0 side come first and must face -Y
        for normal in normals.iter().skip(faces_before).take(3) {
            assert!(normal.y < -0.9, "expected outward wall normal, got {normal:?}");
        }
        // the last two faces are the bottom cap and must face -Z
        for normal in normals.iter().rev().take(2) {
            assert!(normal.z < -0.9, "expected downward cap normal, got {normal:?}");
        }
    }
}
