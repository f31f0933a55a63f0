//! Binary STL writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use log::info;

use relief_core::{Result, TriangleMesh};

/// Write a mesh as triangle-soup binary STL: an 80-byte header, a `u32`
/// triangle count, then per face one normal, three vertices, and a zero
/// attribute byte count, all little-endian.
pub fn write_stl<P: AsRef<Path>>(path: P, mesh: &TriangleMesh) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let mut header = [0u8; 80];
    let tag = b"relief heightmap mesh";
    header[..tag.len()].copy_from_slice(tag);
    writer.write_all(&header)?;
    writer.write_u32::<LittleEndian>(mesh.face_count() as u32)?;

    let normals = mesh.calculate_face_normals();
    for (face, normal) in mesh.faces.iter().zip(&normals) {
        for component in [normal.x, normal.y, normal.z] {
            writer.write_f32::<LittleEndian>(component)?;
        }
        for &index in face {
            let vertex = mesh.vertices[index];
            for component in [vertex.x, vertex.y, vertex.z] {
                writer.write_f32::<LittleEndian>(component)?;
            }
        }
        writer.write_u16::<LittleEndian>(0)?;
    }
    writer.flush()?;
    info!("wrote {} triangles to {:?}", mesh.face_count(), path);
    Ok(())
}
