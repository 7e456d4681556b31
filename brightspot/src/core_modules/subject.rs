// THEORY:
// A `Subject` is the summary of one bright region in one frame: where it is,
// how big it is and how bright it is. It is a "dumb" data container with no
// memory of earlier frames and no identity; the next frame builds a fresh set
// from scratch.
//
// The `SubjectBuilder` turns a boundary polygon into a `Subject`, or quietly
// discards it:
// 1.  **Moments**: polygon moments give the area (`m00`) and the centroid. A
//     zero-area polygon has no centroid and is dropped.
// 2.  **Area Gate**: regions outside `[min_area, max_area]` are dropped.
// 3.  **Masked Brightness**: the polygon is filled into a mask the size of its
//     bounding box and the intensity field is averaged under the mask only, so
//     dark background inside the bounding box never dilutes the mean.

use crate::config::DetectionConfig;
use crate::core_modules::polygon::{self, PolygonMoments};
use image::GrayImage;
use imageproc::point::Point;

/// A single bright region detected in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    /// Centroid column in pixel space.
    pub x: f64,
    /// Centroid row in pixel space.
    pub y: f64,
    /// Polygon area of the boundary (`m00`).
    pub area: f64,
    /// Mean intensity (0-255) of the pixels enclosed by the boundary.
    pub brightness: f64,
    /// Boundary polygon. Only used for drawing.
    pub contour: Vec<Point<i32>>,
}

impl Subject {
    /// Centroid truncated to integer pixel coordinates, the anchor for drawing.
    pub fn anchor(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// Filters regions by area and packages survivors as `Subject`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectBuilder {
    min_area: f64,
    max_area: f64,
}

impl SubjectBuilder {
    pub fn new(min_area: f64, max_area: f64) -> Self {
        Self { min_area, max_area }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(config.min_area, config.max_area)
    }

    pub fn build(&self, contour: Vec<Point<i32>>, gray: &GrayImage) -> Option<Subject> {
        let moments = PolygonMoments::of(&contour);
        let (x, y) = moments.centroid()?;

        let area = moments.area();
        if area < self.min_area || area > self.max_area {
            return None;
        }

        let brightness = masked_mean(&contour, gray)?;
        Some(Subject {
            x,
            y,
            area,
            brightness,
            contour,
        })
    }
}

/// Mean of `gray` over the filled polygon. `None` if the polygon covers no pixel
/// of the field.
fn masked_mean(contour: &[Point<i32>], gray: &GrayImage) -> Option<f64> {
    let (width, height) = (gray.width() as i32, gray.height() as i32);
    let min_x = contour.iter().map(|p| p.x).min()?.max(0);
    let min_y = contour.iter().map(|p| p.y).min()?.max(0);
    let max_x = contour.iter().map(|p| p.x).max()?.min(width - 1);
    let max_y = contour.iter().map(|p| p.y).max()?.min(height - 1);
    if max_x < min_x || max_y < min_y {
        return None;
    }

    let mut mask = GrayImage::new((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32);
    polygon::fill_mut(&mut mask, contour, (min_x, min_y));

    let mut sum = 0u64;
    let mut count = 0u64;
    for (mx, my, m) in mask.enumerate_pixels() {
        if m.0[0] != 0 {
            sum += gray.get_pixel(mx + min_x as u32, my + min_y as u32).0[0] as u64;
            count += 1;
        }
    }

    if count == 0 {
        return None;
    }
    Some(sum as f64 / count as f64)
}
