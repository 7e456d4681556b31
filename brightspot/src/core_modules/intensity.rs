// THEORY (Intensity Field):
// The first step of every frame is to collapse colour into a single brightness
// scalar per pixel. This is a strictly single-pixel (1D) operation: no
// neighbours, no history. Two products come out of it:
//
// - the grayscale intensity field, which the subject builder later averages
//   over each region to rank subjects by brightness;
// - the binary field (0 or 255), which the region extractor traces for
//   connected components.
//
// Luminance uses the Rec. 601 weights (0.299, 0.587, 0.114) in 14-bit fixed
// point, so the conversion is a multiply-add and a shift with no float math in
// the hot loop. The three weights sum to exactly 1 << 14, which keeps pure
// white at 255 and pure black at 0.

pub mod intensity {
    use image::{GrayImage, Luma, Rgb, RgbImage};

    pub type Intensity = u8;

    const SHIFT: u32 = 14;
    const RED_WEIGHT: u32 = 4899;
    const GREEN_WEIGHT: u32 = 9617;
    const BLUE_WEIGHT: u32 = 1868;
    const ROUNDING: u32 = 1 << (SHIFT - 1);

    /// Rec. 601 luminance of a single RGB pixel.
    #[inline]
    pub fn luminance(pixel: &Rgb<u8>) -> Intensity {
        let [r, g, b] = pixel.0;
        let weighted =
            r as u32 * RED_WEIGHT + g as u32 * GREEN_WEIGHT + b as u32 * BLUE_WEIGHT + ROUNDING;
        (weighted >> SHIFT) as Intensity
    }

    /// Converts a colour frame into its intensity field.
    pub fn to_gray(frame: &RgbImage) -> GrayImage {
        GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
            Luma([luminance(frame.get_pixel(x, y))])
        })
    }

    /// Foreground (255) wherever `value >= threshold`, background (0) elsewhere.
    pub fn binarize(gray: &GrayImage, threshold: Intensity) -> GrayImage {
        GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            if gray.get_pixel(x, y).0[0] >= threshold {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::intensity::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn extremes_map_to_extremes() {
        assert_eq!(luminance(&Rgb([255, 255, 255])), 255);
        assert_eq!(luminance(&Rgb([0, 0, 0])), 0);
    }

    #[test]
    fn green_dominates_the_weighting() {
        let red = luminance(&Rgb([255, 0, 0]));
        let green = luminance(&Rgb([0, 255, 0]));
        let blue = luminance(&Rgb([0, 0, 255]));
        assert_eq!(red, 76);
        assert_eq!(green, 150);
        assert_eq!(blue, 29);
    }

    #[test]
    fn gray_pixels_keep_their_value() {
        for v in [1u8, 100, 160, 200, 254] {
            assert_eq!(luminance(&Rgb([v, v, v])), v);
        }
    }

    #[test]
    fn binarize_includes_the_threshold_value() {
        let mut frame = RgbImage::new(3, 1);
        frame.put_pixel(0, 0, Rgb([149, 149, 149]));
        frame.put_pixel(1, 0, Rgb([150, 150, 150]));
        frame.put_pixel(2, 0, Rgb([151, 151, 151]));

        let binary = binarize(&to_gray(&frame), 150);
        assert_eq!(binary.get_pixel(0, 0).0[0], 0);
        assert_eq!(binary.get_pixel(1, 0).0[0], 255);
        assert_eq!(binary.get_pixel(2, 0).0[0], 255);
    }
}
