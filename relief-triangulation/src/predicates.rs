//! Exact geometric predicates on integer pixel coordinates
//!
//! All triangulation decisions (orientation, point-on-edge, incircle)
//! are made with 64-bit integer determinants, so they are exact as long
//! as the coordinates stay within the `MAX_DIMENSION` cap that
//! `Heightmap` enforces on construction.

use nalgebra::Vector2;

/// A sample coordinate on the heightmap grid.
pub(crate) type Pixel = Vector2<i32>;

/// Twice the signed area of triangle `(a, b, c)`: positive when the
/// triangle winds counter-clockwise, zero when the points are collinear.
#[inline]
pub(crate) fn orient(a: Pixel, b: Pixel, c: Pixel) -> i64 {
    let abx = (b.x - a.x) as i64;
    let aby = (b.y - a.y) as i64;
    let acx = (c.x - a.x) as i64;
    let acy = (c.y - a.y) as i64;
    abx * acy - aby * acx
}

/// Whether `p` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `(a, b, c)`. Cocircular points are
/// reported as outside, so callers never flip an edge on a tie.
pub(crate) fn in_circle(a: Pixel, b: Pixel, c: Pixel, p: Pixel) -> bool {
    let dx = (a.x - p.x) as i64;
    let dy = (a.y - p.y) as i64;
    let ex = (b.x - p.x) as i64;
    let ey = (b.y - p.y) as i64;
    let fx = (c.x - p.x) as i64;
    let fy = (c.y - p.y) as i64;

    let ap = dx * dx + dy * dy;
    let bp = ex * ex + ey * ey;
    let cp = fx * fx + fy * fy;

    ap * (ex * fy - ey * fx) - bp * (dx * fy - dy * fx) + cp * (dx * ey - dy * ex) > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use relief_core::MAX_DIMENSION;

    #[test]
    fn test_orient_signs() {
        let a = Pixel::new(0, 0);
        let b = Pixel::new(4, 0);
        let c = Pixel::new(0, 4);
        assert!(orient(a, b, c) > 0);
        assert!(orient(a, c, b) < 0);
    }

    #[test]
    fn test_orient_collinear() {
        let a = Pixel::new(0, 0);
        let b = Pixel::new(2, 2);
        let c = Pixel::new(5, 5);
        assert_eq!(orient(a, b, c), 0);
    }

    #[test]
    fn test_in_circle_inside() {
        let a = Pixel::new(0, 0);
        let b = Pixel::new(2, 0);
        let c = Pixel::new(0, 2);
        assert!(in_circle(a, b, c, Pixel::new(1, 1)));
    }

    #[test]
    fn test_in_circle_outside() {
        let a = Pixel::new(0, 0);
        let b = Pixel::new(2, 0);
        let c = Pixel::new(0, 2);
        assert!(!in_circle(a, b, c, Pixel::new(3, 3)));
    }

    #[test]
    fn test_in_circle_cocircular_is_outside() {
        // (2, 2) lies exactly on the circumcircle through the other three
        let a = Pixel::new(0, 0);
        let b = Pixel::new(2, 0);
        let c = Pixel::new(0, 2);
        assert!(!in_circle(a, b, c, Pixel::new(2, 2)));
    }

    #[test]
    fn test_in_circle_exact_at_max_dimension() {
        // the determinant must not wrap at the documented size cap
        let n = (MAX_DIMENSION - 1) as i32;
        let a = Pixel::new(0, 0);
        let b = Pixel::new(n, 0);
        let c = Pixel::new(0, n);
        assert!(in_circle(a, b, c, Pixel::new(n / 2, n / 2)));
        assert!(!in_circle(a, b, c, Pixel::new(n, n)));
    }
}
