// THEORY:
// Boundary polygons are the only geometry the engine keeps about a region. Two
// things are ever asked of them:
//
// 1.  **Moments**: the zeroth and first spatial moments of the polygon, computed
//     with Green's theorem over its edges. `m00` is the signed area; the centroid
//     is `(m10 / m00, m01 / m00)`. Traversal direction only flips the sign of all
//     three moments, so the centroid does not depend on it.
// 2.  **Filling**: rasterising the polygon into a binary mask, interior and
//     boundary pixels both set. The subject builder averages brightness under
//     this mask and the simple overlay darkens under it.

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

pub const MASK_ON: Luma<u8> = Luma([255]);

/// Zeroth and first order moments of a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolygonMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl PolygonMoments {
    pub fn of(points: &[Point<i32>]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self::default();
        }

        let mut m00 = 0.0;
        let mut m10 = 0.0;
        let mut m01 = 0.0;
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let (xa, ya) = (a.x as f64, a.y as f64);
            let (xb, yb) = (b.x as f64, b.y as f64);
            let cross = xa * yb - xb * ya;
            m00 += cross;
            m10 += (xa + xb) * cross;
            m01 += (ya + yb) * cross;
        }

        Self {
            m00: m00 / 2.0,
            m10: m10 / 6.0,
            m01: m01 / 6.0,
        }
    }

    /// Unsigned polygon area.
    pub fn area(&self) -> f64 {
        self.m00.abs()
    }

    /// `None` for degenerate polygons with zero area.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Drops trailing copies of the first point; the polygon is closed implicitly.
fn open_ring(points: &[Point<i32>]) -> &[Point<i32>] {
    let mut end = points.len();
    while end > 1 && points[end - 1] == points[0] {
        end -= 1;
    }
    &points[..end]
}

/// Rasterises `points` into `mask`, shifted by `(-origin_x, -origin_y)`.
///
/// Pixels falling outside the mask are clipped.
pub fn fill_mut(mask: &mut GrayImage, points: &[Point<i32>], origin: (i32, i32)) {
    let ring: Vec<Point<i32>> = open_ring(points)
        .iter()
        .map(|p| Point::new(p.x - origin.0, p.y - origin.1))
        .collect();

    match ring.len() {
        0 => return,
        1 | 2 => {
            let a = ring[0];
            let b = ring[ring.len() - 1];
            draw_line_segment_mut(mask, (a.x as f32, a.y as f32), (b.x as f32, b.y as f32), MASK_ON);
        }
        _ => draw_polygon_mut(mask, &ring, MASK_ON),
    }

    // Boundary pixels belong to the region whatever the scanline rule decides.
    let (width, height) = (mask.width() as i32, mask.height() as i32);
    for p in &ring {
        if p.x >= 0 && p.y >= 0 && p.x < width && p.y < height {
            mask.put_pixel(p.x as u32, p.y as u32, MASK_ON);
        }
    }
}
