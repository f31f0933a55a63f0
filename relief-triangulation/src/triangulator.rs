//! Incremental greedy refinement over a half-edge triangulation

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;
use nalgebra::Point3;

use relief_core::{Error, Heightmap, Result, TriangleMesh, MAX_DIMENSION};

use crate::predicates::{in_circle, orient, Pixel};

const INVALID: usize = usize::MAX;

/// One queue entry per live triangle, keyed by candidate error.
///
/// Entries are never updated in place. When a triangle slot is rewritten
/// its generation advances, and entries carrying an older generation are
/// discarded when they surface.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    error: f32,
    triangle: usize,
    generation: u32,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on error; the index comparisons make equal-error pops
        // deterministic for reproducible output
        self.error
            .total_cmp(&other.error)
            .then_with(|| other.triangle.cmp(&self.triangle))
            .then_with(|| other.generation.cmp(&self.generation))
    }
}

/// Greedy incremental Delaunay triangulator over a heightmap.
///
/// Starts from the two corner triangles covering the full grid and
/// repeatedly inserts the sample point with the worst vertical deviation
/// from the current surface, restoring the Delaunay condition by edge
/// flipping after every insertion. Every vertex is an exact sample
/// point; elevations are read from the heightmap and never interpolated
/// into the vertex set.
pub struct Triangulator<'a> {
    heightmap: &'a Heightmap,
    /// Sample coordinates of the inserted vertices, append-only.
    points: Vec<Pixel>,
    /// Origin vertex of each half-edge; triangle `t` owns half-edges
    /// `3t .. 3t+3` in ccw order.
    triangles: Vec<usize>,
    /// Twin of each half-edge, `INVALID` on the hull.
    halfedges: Vec<usize>,
    /// Worst-error pixel of each triangle.
    candidates: Vec<Pixel>,
    /// Absolute deviation at each triangle's candidate.
    errors: Vec<f32>,
    /// Advanced whenever a triangle slot is rewritten.
    generations: Vec<u32>,
    queue: BinaryHeap<QueueEntry>,
    /// Half-edges whose Delaunay condition is suspect.
    suspect: Vec<usize>,
    terminal_error: f32,
}

impl<'a> Triangulator<'a> {
    /// Build the initial two-triangle triangulation over `heightmap`.
    ///
    /// Fails when the grid is smaller than 2x2 (no triangle can be
    /// formed) or larger than [`MAX_DIMENSION`] per axis (the integer
    /// incircle predicate could overflow).
    pub fn new(heightmap: &'a Heightmap) -> Result<Self> {
        let width = heightmap.width();
        let height = heightmap.height();
        if width < 2 || height < 2 {
            return Err(Error::InvalidData(format!(
                "heightmap {width}x{height} is too small to triangulate"
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::InvalidData(format!(
                "heightmap {width}x{height} exceeds the supported maximum of {MAX_DIMENSION} per axis"
            )));
        }

        let mut tri = Self {
            heightmap,
            points: Vec::new(),
            triangles: Vec::new(),
            halfedges: Vec::new(),
            candidates: Vec::new(),
            errors: Vec::new(),
            generations: Vec::new(),
            queue: BinaryHeap::new(),
            suspect: Vec::new(),
            terminal_error: 0.0,
        };

        let x1 = (width - 1) as i32;
        let y1 = (height - 1) as i32;
        let p0 = tri.add_point(Pixel::new(0, 0));
        let p1 = tri.add_point(Pixel::new(x1, 0));
        let p2 = tri.add_point(Pixel::new(0, y1));
        let p3 = tri.add_point(Pixel::new(x1, y1));

        // two ccw triangles split along the (0,0)-(x1,y1) diagonal
        let t0 = tri.add_triangle(p0, p1, p3, INVALID, INVALID, INVALID, INVALID);
        tri.add_triangle(p0, p3, p2, t0 + 2, INVALID, INVALID, INVALID);
        Ok(tri)
    }

    /// Refine until every termination bound is met.
    ///
    /// `max_error` is an absolute bound on the per-pixel vertical
    /// deviation in the `[0, 1]` elevation range; `max_triangles` and
    /// `max_points` cap the mesh size, with 0 meaning unbounded.
    /// Refinement stops as soon as the worst candidate error drops to
    /// `max_error` or either size cap is reached. Calling `run` again
    /// with looser bounds continues refining from where it stopped.
    pub fn run(&mut self, max_error: f32, max_triangles: usize, max_points: usize) {
        // a zero-error triangle's candidate coincides with one of its own
        // vertices and must never be inserted
        let max_error = max_error.max(0.0);
        while let Some((triangle, error)) = self.pop_freshest() {
            let done = error <= max_error
                || (max_triangles > 0 && self.triangle_count() >= max_triangles)
                || (max_points > 0 && self.point_count() >= max_points);
            if done {
                // the popped entry stays conceptually queued; it is the
                // next triangle a continued run would process
                self.terminal_error = error;
                self.queue.push(QueueEntry {
                    error,
                    triangle,
                    generation: self.generations[triangle],
                });
                break;
            }
            self.split(triangle);
        }
        debug!(
            "refined to {} points, {} triangles, error {}",
            self.point_count(),
            self.triangle_count(),
            self.terminal_error
        );
    }

    /// Number of inserted sample points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of live triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Candidate error of the triangle the next refinement step would
    /// split, in elevation units. Zero until [`run`](Self::run) returns.
    pub fn error(&self) -> f32 {
        self.terminal_error
    }

    /// Vertex list in pixel units, elevations straight from the heightmap.
    pub fn points(&self) -> Vec<Point3<f32>> {
        self.points
            .iter()
            .map(|p| {
                Point3::new(
                    p.x as f32,
                    p.y as f32,
                    self.heightmap.at(p.x as usize, p.y as usize),
                )
            })
            .collect()
    }

    /// Counter-clockwise vertex-index triples, in slot order.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect()
    }

    /// Assemble the refined surface as a mesh.
    pub fn mesh(&self) -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(self.points(), self.triangles())
    }

    fn add_point(&mut self, p: Pixel) -> usize {
        self.points.push(p);
        self.points.len() - 1
    }

    /// Create triangle `(a, b, c)` whose half-edges twin with `ab`,
    /// `bc`, `ca`, reusing the retired slot whose base half-edge is
    /// `slot` (`INVALID` appends a fresh slot). Computes the new
    /// triangle's candidate and enqueues it. Returns the base half-edge.
    #[allow(clippy::too_many_arguments)]
    fn add_triangle(
        &mut self,
        a: usize,
        b: usize,
        c: usize,
        ab: usize,
        bc: usize,
        ca: usize,
        slot: usize,
    ) -> usize {
        let e = if slot == INVALID {
            let e = self.triangles.len();
            self.triangles.extend_from_slice(&[a, b, c]);
            self.halfedges.extend_from_slice(&[ab, bc, ca]);
            self.candidates.push(Pixel::zeros());
            self.errors.push(0.0);
            self.generations.push(0);
            e
        } else {
            self.triangles[slot] = a;
            self.triangles[slot + 1] = b;
            self.triangles[slot + 2] = c;
            self.halfedges[slot] = ab;
            self.halfedges[slot + 1] = bc;
            self.halfedges[slot + 2] = ca;
            slot
        };
        if ab != INVALID {
            self.halfedges[ab] = e;
        }
        if bc != INVALID {
            self.halfedges[bc] = e + 1;
        }
        if ca != INVALID {
            self.halfedges[ca] = e + 2;
        }

        let t = e / 3;
        let (candidate, error) =
            self.find_candidate(self.points[a], self.points[b], self.points[c]);
        self.candidates[t] = candidate;
        self.errors[t] = error;
        self.queue.push(QueueEntry {
            error,
            triangle: t,
            generation: self.generations[t],
        });
        e
    }

    /// Scan every pixel covered by the closed ccw triangle `(a, b, c)`
    /// and return the pixel whose elevation deviates most from the plane
    /// through the three vertex elevations, with that deviation.
    ///
    /// The three edge functions and the plane interpolant are linear in
    /// the pixel coordinates, so both advance by constant deltas across
    /// a scanline. Pixels coinciding with the triangle's own vertices
    /// are skipped: their true error is zero, and excluding them
    /// guarantees a candidate is never an existing vertex even when the
    /// interpolated plane rounds to a nonzero deviation there.
    fn find_candidate(&self, a: Pixel, b: Pixel, c: Pixel) -> (Pixel, f32) {
        let min = Pixel::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y));
        let max = Pixel::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y));

        // edge-function values at the bounding-box corner
        let mut w0_row = orient(b, c, min);
        let mut w1_row = orient(c, a, min);
        let mut w2_row = orient(a, b, min);

        // per-column and per-row deltas
        let a0 = (b.y - c.y) as i64;
        let a1 = (c.y - a.y) as i64;
        let a2 = (a.y - b.y) as i64;
        let b0 = (c.x - b.x) as i64;
        let b1 = (a.x - c.x) as i64;
        let b2 = (b.x - a.x) as i64;

        let area = orient(a, b, c) as f64;
        let za = self.heightmap.at(a.x as usize, a.y as usize) as f64;
        let zb = self.heightmap.at(b.x as usize, b.y as usize) as f64;
        let zc = self.heightmap.at(c.x as usize, c.y as usize) as f64;

        let mut best = a;
        let mut best_error = 0.0f64;
        for y in min.y..=max.y {
            let mut w0 = w0_row;
            let mut w1 = w1_row;
            let mut w2 = w2_row;
            for x in min.x..=max.x {
                if w0 >= 0 && w1 >= 0 && w2 >= 0 {
                    let p = Pixel::new(x, y);
                    if p != a && p != b && p != c {
                        let plane = (w0 as f64 * za + w1 as f64 * zb + w2 as f64 * zc) / area;
                        let sample = self.heightmap.at(x as usize, y as usize) as f64;
                        let error = (plane - sample).abs();
                        if error > best_error {
                            best_error = error;
                            best = p;
                        }
                    }
                }
                w0 += a0;
                w1 += a1;
                w2 += a2;
            }
            w0_row += b0;
            w1_row += b1;
            w2_row += b2;
        }
        (best, best_error as f32)
    }

    /// Pop queue entries until a live one surfaces.
    fn pop_freshest(&mut self) -> Option<(usize, f32)> {
        while let Some(entry) = self.queue.pop() {
            if entry.generation == self.generations[entry.triangle] {
                return Some((entry.triangle, entry.error));
            }
        }
        None
    }

    /// Insert triangle `t`'s candidate point, splitting `t` (and its
    /// neighbour when the candidate lies on a shared edge), then restore
    /// the Delaunay condition around the insertion site.
    fn split(&mut self, t: usize) {
        let e0 = t * 3;
        let a = self.points[self.triangles[e0]];
        let b = self.points[self.triangles[e0 + 1]];
        let c = self.points[self.triangles[e0 + 2]];
        let p = self.candidates[t];
        let pn = self.add_point(p);

        // exact integer decision: on which edge, if any, does p lie?
        if orient(a, b, p) == 0 {
            self.split_edge(e0, pn);
        } else if orient(b, c, p) == 0 {
            self.split_edge(e0 + 1, pn);
        } else if orient(c, a, p) == 0 {
            self.split_edge(e0 + 2, pn);
        } else {
            self.split_interior(t, pn);
        }
        self.legalize();
    }

    /// Replace triangle `t` with three triangles fanning from `pn`.
    fn split_interior(&mut self, t: usize, pn: usize) {
        let e0 = t * 3;
        let p0 = self.triangles[e0];
        let p1 = self.triangles[e0 + 1];
        let p2 = self.triangles[e0 + 2];
        let h0 = self.halfedges[e0];
        let h1 = self.halfedges[e0 + 1];
        let h2 = self.halfedges[e0 + 2];

        self.generations[t] += 1;
        let t0 = self.add_triangle(p0, p1, pn, h0, INVALID, INVALID, e0);
        let t1 = self.add_triangle(p1, p2, pn, h1, INVALID, t0 + 1, INVALID);
        let t2 = self.add_triangle(p2, p0, pn, h2, t0 + 2, t1 + 1, INVALID);
        self.suspect.extend_from_slice(&[t0, t1, t2]);
    }

    /// Split the edge at half-edge `a`, fanning from `pn` over the two
    /// adjacent triangles (or one, when `a` lies on the hull).
    fn split_edge(&mut self, a: usize, pn: usize) {
        let a0 = a - a % 3;
        let al = a0 + (a + 1) % 3;
        let ar = a0 + (a + 2) % 3;
        let p0 = self.triangles[ar];
        let pr = self.triangles[a];
        let pl = self.triangles[al];
        let hal = self.halfedges[al];
        let har = self.halfedges[ar];
        let b = self.halfedges[a];

        if b == INVALID {
            // hull edge: only two triangles fan from the new vertex
            self.generations[a0 / 3] += 1;
            let t0 = self.add_triangle(pn, p0, pr, INVALID, har, INVALID, a0);
            let t1 = self.add_triangle(p0, pn, pl, t0, INVALID, hal, INVALID);
            self.suspect.extend_from_slice(&[t0 + 1, t1 + 2]);
            return;
        }

        let b0 = b - b % 3;
        let bl = b0 + (b + 2) % 3;
        let br = b0 + (b + 1) % 3;
        let p1 = self.triangles[bl];
        let hbl = self.halfedges[bl];
        let hbr = self.halfedges[br];

        self.generations[a0 / 3] += 1;
        self.generations[b0 / 3] += 1;
        let t0 = self.add_triangle(p0, pr, pn, har, INVALID, INVALID, a0);
        let t1 = self.add_triangle(pr, p1, pn, hbr, INVALID, t0 + 1, b0);
        let t2 = self.add_triangle(p1, pl, pn, hbl, INVALID, t1 + 1, INVALID);
        let t3 = self.add_triangle(pl, p0, pn, hal, t0 + 2, t2 + 1, INVALID);
        self.suspect.extend_from_slice(&[t0, t1, t2, t3]);
    }

    /// Lawson flip pass: while any half-edge is suspect, flip it when
    /// the neighbouring apex lies strictly inside the triangle's
    /// circumcircle and re-suspect the surrounding quadrilateral.
    /// Cocircular configurations are left alone, which both satisfies
    /// the Delaunay condition as an inequality and guarantees the pass
    /// terminates.
    fn legalize(&mut self) {
        while let Some(a) = self.suspect.pop() {
            let b = self.halfedges[a];
            if b == INVALID {
                continue;
            }

            let a0 = a - a % 3;
            let al = a0 + (a + 1) % 3;
            let ar = a0 + (a + 2) % 3;
            let b0 = b - b % 3;
            let bl = b0 + (b + 2) % 3;
            let br = b0 + (b + 1) % 3;

            let p0 = self.triangles[ar];
            let pr = self.triangles[a];
            let pl = self.triangles[al];
            let p1 = self.triangles[bl];

            if !in_circle(
                self.points[p0],
                self.points[pr],
                self.points[pl],
                self.points[p1],
            ) {
                continue;
            }

            let hal = self.halfedges[al];
            let har = self.halfedges[ar];
            let hbl = self.halfedges[bl];
            let hbr = self.halfedges[br];

            // retriangulate the quadrilateral along the other diagonal
            self.generations[a0 / 3] += 1;
            self.generations[b0 / 3] += 1;
            let t0 = self.add_triangle(p0, p1, pl, INVALID, hbl, hal, a0);
            let t1 = self.add_triangle(p1, p0, pr, t0, har, hbr, b0);
            self.suspect.extend_from_slice(&[t0 + 1, t0 + 2, t1 + 1, t1 + 2]);
        }
    }

    #[cfg(test)]
    fn verify_invariants(&self) {
        let next = |e: usize| e - e % 3 + (e + 1) % 3;
        let prev = |e: usize| e - e % 3 + (e + 2) % 3;

        for t in 0..self.triangle_count() {
            let a = self.points[self.triangles[t * 3]];
            let b = self.points[self.triangles[t * 3 + 1]];
            let c = self.points[self.triangles[t * 3 + 2]];
            assert!(orient(a, b, c) > 0, "triangle {t} is not ccw");
        }

        for e in 0..self.halfedges.len() {
            let twin = self.halfedges[e];
            if twin == INVALID {
                continue;
            }
            assert_eq!(self.halfedges[twin], e, "twin symmetry broken at {e}");
            assert_eq!(
                self.triangles[e],
                self.triangles[next(twin)],
                "twin {twin} does not share the edge of {e}"
            );
            assert_eq!(self.triangles[twin], self.triangles[next(e)]);

            // local Delaunay: the apex across the edge must not lie
            // strictly inside this triangle's circumcircle
            let apex = self.points[self.triangles[prev(e)]];
            let start = self.points[self.triangles[e]];
            let end = self.points[self.triangles[next(e)]];
            let opposite = self.points[self.triangles[prev(twin)]];
            assert!(
                !in_circle(apex, start, end, opposite),
                "edge {e} is not locally Delaunay"
            );
        }

        for t in 0..self.triangle_count() {
            let a = self.points[self.triangles[t * 3]];
            let b = self.points[self.triangles[t * 3 + 1]];
            let c = self.points[self.triangles[t * 3 + 2]];
            let (_, error) = self.find_candidate(a, b, c);
            assert_eq!(error, self.errors[t], "stale candidate on triangle {t}");
        }
    }
}
