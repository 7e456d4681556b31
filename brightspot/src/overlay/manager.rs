// THEORY:
// The `OverlayManager` owns one instance of each renderer and a style selector.
// Every renderer keeps its own enabled flag: `toggle` only touches the active
// renderer, and switching style never resets either flag or the glitch
// renderer's slot state. Switching back and forth therefore restores exactly
// what the user last saw in each style.

use crate::config::OverlayConfig;
use crate::core_modules::subject::Subject;
use crate::error::ConfigError;
use crate::overlay::{GlitchOverlay, Overlay, OverlayStyle, SimpleOverlay};
use image::RgbImage;

pub struct OverlayManager {
    simple: SimpleOverlay,
    glitch: GlitchOverlay,
    style: OverlayStyle,
}

impl OverlayManager {
    pub fn new(config: &OverlayConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            simple: SimpleOverlay::new(config)?,
            glitch: GlitchOverlay::new(config)?,
            style: OverlayStyle::default(),
        })
    }

    pub fn style(&self) -> OverlayStyle {
        self.style
    }

    pub fn simple(&self) -> &SimpleOverlay {
        &self.simple
    }

    pub fn glitch(&self) -> &GlitchOverlay {
        &self.glitch
    }

    pub fn glitch_mut(&mut self) -> &mut GlitchOverlay {
        &mut self.glitch
    }

    fn active(&self) -> &dyn Overlay {
        match self.style {
            OverlayStyle::Simple => &self.simple,
            OverlayStyle::Glitch => &self.glitch,
        }
    }

    fn active_mut(&mut self) -> &mut dyn Overlay {
        match self.style {
            OverlayStyle::Simple => &mut self.simple,
            OverlayStyle::Glitch => &mut self.glitch,
        }
    }

    /// Enabled flag of the active renderer.
    pub fn is_enabled(&self) -> bool {
        self.active().is_enabled()
    }

    pub fn draw(&mut self, frame: RgbImage, subjects: &[Subject]) -> RgbImage {
        self.active_mut().draw(frame, subjects)
    }

    pub fn switch_style(&mut self) -> OverlayStyle {
        self.style = self.style.next();
        log::info!("switched to {} overlay", self.style.name());
        self.style
    }

    /// Flips the active renderer's enabled flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        let overlay = self.active_mut();
        overlay.toggle();
        let enabled = overlay.is_enabled();
        log::info!(
            "{} overlay {}",
            self.style.name(),
            if enabled { "enabled" } else { "disabled" }
        );
        enabled
    }
}
