// THEORY:
// Overlays are the rendering half of the engine. They consume a frame and the
// ranked subjects for that frame and return an annotated frame of the same
// size. There are exactly two strategies, so the style is a closed enum rather
// than an open plug-in point; both strategies share the `Overlay` capability
// trait so the manager can dispatch without caring which one is active.

pub mod glitch;
pub mod glyphs;
pub mod manager;
pub mod simple;

use crate::core_modules::subject::Subject;
use image::RgbImage;

pub use glitch::{GlitchOverlay, GlitchState};
pub use manager::OverlayManager;
pub use simple::SimpleOverlay;

/// The two interchangeable rendering strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayStyle {
    #[default]
    Simple,
    Glitch,
}

impl OverlayStyle {
    /// The other style; switching twice returns to the start.
    pub fn next(self) -> Self {
        match self {
            OverlayStyle::Simple => OverlayStyle::Glitch,
            OverlayStyle::Glitch => OverlayStyle::Simple,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OverlayStyle::Simple => "simple",
            OverlayStyle::Glitch => "glitch",
        }
    }
}

/// Shared capability of every overlay renderer.
pub trait Overlay {
    /// Annotates `frame`. A disabled overlay returns it untouched.
    fn draw(&mut self, frame: RgbImage, subjects: &[Subject]) -> RgbImage;

    fn toggle(&mut self);

    fn is_enabled(&self) -> bool;
}
