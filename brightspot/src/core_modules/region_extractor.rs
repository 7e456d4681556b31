// THEORY:
// The `RegionExtractor` is the front of the spatial layer. It turns a binary
// "is this pixel bright?" field into a list of regions, each described only by
// its outer boundary polygon.
//
// Algorithm:
// 1.  **Binarization**: the intensity field is thresholded (`value >= threshold`)
//     and framed by a one-pixel dark margin. The border follower never starts a
//     trace on the outermost row or column, so without the margin a region
//     touching the frame edge would be lost. Traced points are shifted back by
//     (-1, -1) into frame coordinates.
// 2.  **Border Following**: Suzuki-Abe border following (via `imageproc`) walks
//     every 8-connected foreground component and records both its outer border
//     and the borders of any holes inside it, with a parent link per border.
// 3.  **Outer-Only Selection**: only outer borders without a parent survive. A
//     hole border is not a region, and a bright island sitting inside the hole
//     of a larger region is treated as part of that region's footprint rather
//     than as a subject of its own.
//
// Like the rest of the spatial layer this is a stateless utility: one frame in,
// one list of polygons out. Polygon order is scan order and carries no meaning;
// ranking happens later.

use crate::core_modules::intensity::intensity;
use image::{GrayImage, RgbImage, imageops};
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

pub mod region_extractor {
    use super::*;

    /// Outer boundary polygon of one bright region, in pixel coordinates.
    pub type Region = Vec<Point<i32>>;

    /// Extracts bright regions straight from a colour frame.
    pub fn extract(frame: &RgbImage, threshold: u8) -> Vec<Region> {
        let gray = intensity::to_gray(frame);
        extract_from_gray(&gray, threshold)
    }

    /// Extracts bright regions from an already computed intensity field.
    pub fn extract_from_gray(gray: &GrayImage, threshold: u8) -> Vec<Region> {
        // --- 1. Binarization ---
        let binary = intensity::binarize(gray, threshold);
        let mut padded = GrayImage::new(binary.width() + 2, binary.height() + 2);
        imageops::replace(&mut padded, &binary, 1, 1);

        // --- 2. Border Following & 3. Outer-Only Selection ---
        find_contours::<i32>(&padded)
            .into_iter()
            .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
            .map(|contour| unpad(contour.points))
            .filter(|points| !points.is_empty())
            .collect()
    }

    fn unpad(points: Vec<Point<i32>>) -> Region {
        points.into_iter().map(|p| Point::new(p.x - 1, p.y - 1)).collect()
    }
}
