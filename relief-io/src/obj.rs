//! Wavefront OBJ writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use relief_core::{Result, TriangleMesh};

/// Write a mesh as Wavefront OBJ with 1-based indices. When the mesh
/// carries UVs, each vertex gets a matching `vt` record and faces
/// reference both (`f v/vt ...`).
pub fn write_obj<P: AsRef<Path>>(path: P, mesh: &TriangleMesh) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    match &mesh.uvs {
        Some(uvs) => {
            for uv in uvs {
                writeln!(writer, "vt {} {}", uv[0], uv[1])?;
            }
            for face in &mesh.faces {
                writeln!(
                    writer,
                    "f {}/{} {}/{} {}/{}",
                    face[0] + 1,
                    face[0] + 1,
                    face[1] + 1,
                    face[1] + 1,
                    face[2] + 1,
                    face[2] + 1
                )?;
            }
        }
        None => {
            for face in &mesh.faces {
                writeln!(writer, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)?;
            }
        }
    }
    writer.flush()?;
    info!(
        "wrote {} vertices, {} faces to {:?}",
        mesh.vertex_count(),
        mesh.face_count(),
        path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_core::Point3f;

    fn make_triangle() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.5),
                Point3f::new(0.0, 2.0, 1.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_obj_without_uvs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        write_obj(&path, &make_triangle()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "v 0 0 0");
        assert_eq!(lines[1], "v 2 0 0.5");
        assert_eq!(lines[3], "f 1 2 3");
    }

    #[test]
    fn test_obj_with_uvs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.obj");
        let mut mesh = make_triangle();
        mesh.set_uvs(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        write_obj(&path, &mesh).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("vt 1 0"));
        assert!(contents.contains("f 1/1 2/2 3/3"));
    }
}
