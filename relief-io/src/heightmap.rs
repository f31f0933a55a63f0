//! Heightmap decoding

use std::path::Path;

use log::info;

use relief_core::{Error, Heightmap, Result};

/// Decode a grayscale heightmap from any supported image format.
///
/// The image is converted to 16-bit luma and normalized to `[0, 1]`, so
/// both 8-bit and 16-bit sources keep their full precision.
pub fn read_heightmap<P: AsRef<Path>>(path: P) -> Result<Heightmap> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| Error::Image(e.to_string()))?;
    let gray = image.into_luma16();
    let (width, height) = gray.dimensions();
    let data = gray
        .pixels()
        .map(|p| p.0[0] as f32 / u16::MAX as f32)
        .collect();
    info!("decoded {}x{} heightmap from {:?}", width, height, path);
    Heightmap::new(width as usize, height as usize, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    #[test]
    fn test_read_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");
        let img = ImageBuffer::from_fn(4, 2, |x, _| Luma([(x * 20000) as u16]));
        img.save(&path).unwrap();

        let hm = read_heightmap(&path).unwrap();
        assert_eq!(hm.width(), 4);
        assert_eq!(hm.height(), 2);
        assert_eq!(hm.at(0, 0), 0.0);
        assert!((hm.at(3, 1) - 60000.0 / 65535.0).abs() < 1e-6);
    }

    #[test]
    fn test_read_missing_file_fails() {
        assert!(matches!(
            read_heightmap("definitely/not/here.png"),
            Err(Error::Image(_))
        ));
    }
}
