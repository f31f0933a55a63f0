//! Heightmap-derived raster outputs: normal map and hillshade
//!
//! Both are computed directly from the heightmap gradient and are
//! independent of the triangulation. Rows are processed in parallel.

use std::path::Path;

use image::{GrayImage, RgbImage};
use log::info;
use nalgebra::Vector3;
use rayon::prelude::*;

use relief_core::{Error, Heightmap, Result};

/// Heightmap gradient at `(x, y)` by central differences, one-sided at
/// the borders, with the elevation scaled by `z_scale`.
fn gradient(hm: &Heightmap, x: usize, y: usize, z_scale: f32) -> (f32, f32) {
    let x0 = x.saturating_sub(1);
    let x1 = (x + 1).min(hm.width() - 1);
    let y0 = y.saturating_sub(1);
    let y1 = (y + 1).min(hm.height() - 1);
    let dx = (hm.at(x1, y) - hm.at(x0, y)) * z_scale / (x1 - x0) as f32;
    let dy = (hm.at(x, y1) - hm.at(x, y0)) * z_scale / (y1 - y0) as f32;
    (dx, dy)
}

fn encode(component: f32) -> u8 {
    ((component * 0.5 + 0.5).clamp(0.0, 1.0) * 255.0) as u8
}

/// Render the heightmap's surface normals as an 8-bit RGB PNG.
pub fn write_normal_map<P: AsRef<Path>>(path: P, hm: &Heightmap, z_scale: f32) -> Result<()> {
    let path = path.as_ref();
    let width = hm.width();
    let height = hm.height();
    let pixels: Vec<u8> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            (0..width).flat_map(move |x| {
                let (dx, dy) = gradient(hm, x, y, z_scale);
                let n = Vector3::new(-dx, -dy, 1.0).normalize();
                [encode(n.x), encode(n.y), encode(n.z)]
            })
        })
        .collect();
    let image = RgbImage::from_raw(width as u32, height as u32, pixels)
        .ok_or_else(|| Error::Image("normal map buffer size mismatch".to_string()))?;
    image.save(path).map_err(|e| Error::Image(e.to_string()))?;
    info!("wrote {}x{} normal map to {:?}", width, height, path);
    Ok(())
}

/// Render a Lambertian hillshade as an 8-bit grayscale PNG.
///
/// `altitude` and `azimuth` give the light direction in degrees;
/// azimuth 0 lights from the +X direction.
pub fn write_hillshade<P: AsRef<Path>>(
    path: P,
    hm: &Heightmap,
    z_scale: f32,
    altitude: f32,
    azimuth: f32,
) -> Result<()> {
    let path = path.as_ref();
    let width = hm.width();
    let height = hm.height();
    let zenith = (90.0 - altitude).to_radians();
    let azimuth = azimuth.to_radians();
    let pixels: Vec<u8> = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| {
            (0..width).map(move |x| {
                let (dx, dy) = gradient(hm, x, y, z_scale);
                let slope = dx.hypot(dy).atan();
                let aspect = (-dy).atan2(-dx);
                let shade = zenith.cos() * slope.cos()
                    + zenith.sin() * slope.sin() * (azimuth - aspect).cos();
                (shade.clamp(0.0, 1.0) * 255.0) as u8
            })
        })
        .collect();
    let image = GrayImage::from_raw(width as u32, height as u32, pixels)
        .ok_or_else(|| Error::Image("hillshade buffer size mismatch".to_string()))?;
    image.save(path).map_err(|e| Error::Image(e.to_string()))?;
    info!("wrote {}x{} hillshade to {:?}", width, height, path);
    Ok(())
}
