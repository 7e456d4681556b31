// THEORY:
// The simple overlay marks subjects plainly:
// 1.  **Shade**: every subject's polygon is filled into one shared mask and the
//     frame is blended toward black under that mask in a single pass. The mask is
//     a union, so overlapping regions are shaded once, not twice.
// 2.  **Rings & Ranks**: in rank order, each subject gets a ring at its centroid
//     and its rank index printed up and to the right, coloured from the palette
//     by `rank % palette.len()`.
// When disabled the overlay returns the frame immediately without building a
// mask.

use crate::config::{OverlayConfig, Rgb as RgbTriple};
use crate::core_modules::polygon;
use crate::core_modules::subject::Subject;
use crate::error::ConfigError;
use crate::overlay::Overlay;
use crate::overlay::glyphs;
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_circle_mut;

const SHADE_ALPHA: f32 = 0.5;
const SHADE_COLOR: [u8; 3] = [0, 0, 0];
const RING_THICKNESS: i32 = 2;
const LABEL_OFFSET: (i32, i32) = (20, -20);
const LABEL_SCALE: u32 = 2;

#[derive(Debug, Clone)]
pub struct SimpleOverlay {
    enabled: bool,
    ring_size: u32,
    colors: Vec<RgbTriple>,
}

impl SimpleOverlay {
    pub fn new(config: &OverlayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            enabled: config.enabled,
            ring_size: config.ring_size,
            colors: config.colors.clone(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn color_for(&self, rank: usize) -> Rgb<u8> {
        Rgb(self.colors[rank % self.colors.len()])
    }

    fn shade(frame: &mut RgbImage, subjects: &[Subject]) {
        let mut mask = GrayImage::new(frame.width(), frame.height());
        for subject in subjects {
            polygon::fill_mut(&mut mask, &subject.contour, (0, 0));
        }

        for (pixel, m) in frame.pixels_mut().zip(mask.pixels()) {
            if m.0[0] == 0 {
                continue;
            }
            for (channel, shade) in pixel.0.iter_mut().zip(SHADE_COLOR) {
                let blended = *channel as f32 * (1.0 - SHADE_ALPHA) + shade as f32 * SHADE_ALPHA;
                *channel = blended as u8;
            }
        }
    }

    fn draw_ring(&self, frame: &mut RgbImage, center: (i32, i32), color: Rgb<u8>) {
        let radius = self.ring_size as i32;
        for step in 0..RING_THICKNESS {
            draw_hollow_circle_mut(frame, center, radius + step, color);
        }
    }
}

impl Overlay for SimpleOverlay {
    fn draw(&mut self, mut frame: RgbImage, subjects: &[Subject]) -> RgbImage {
        if !self.enabled {
            return frame;
        }

        Self::shade(&mut frame, subjects);

        for (rank, subject) in subjects.iter().enumerate() {
            let (x, y) = subject.anchor();
            let color = self.color_for(rank);
            self.draw_ring(&mut frame, (x, y), color);
            glyphs::draw_text_mut(
                &mut frame,
                &rank.to_string(),
                (x + LABEL_OFFSET.0, y + LABEL_OFFSET.1),
                LABEL_SCALE,
                color,
            );
        }

        frame
    }

    fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
