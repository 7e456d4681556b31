// THEORY:
// A `Session` is what a capture loop holds on to: one detector, one overlay
// manager and the validated configuration they came from. It exposes the
// per-frame call and the runtime controls, and nothing else. Processing is
// strictly sequential; controls are applied between frames through `&mut self`.

use crate::config::Config;
use crate::controls::{Command, Flow, THRESHOLD_STEP};
use crate::detector::{Detector, Subject};
use crate::error::ConfigError;
use crate::overlay::{OverlayManager, OverlayStyle};
use image::RgbImage;

/// Output of one processed frame.
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub subjects: Vec<Subject>,
    pub annotated: RgbImage,
}

pub struct Session {
    config: Config,
    detector: Detector,
    overlay: OverlayManager,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let detector = Detector::new(&config.detection)?;
        let overlay = OverlayManager::new(&config.overlay)?;
        Ok(Self {
            config,
            detector,
            overlay,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn overlay(&self) -> &OverlayManager {
        &self.overlay
    }

    pub fn threshold(&self) -> u8 {
        self.detector.threshold()
    }

    /// Detects subjects in `frame` and renders the active overlay over it.
    pub fn process(&mut self, frame: RgbImage) -> FrameResult {
        let subjects = self.detector.detect(&frame);
        let annotated = self.overlay.draw(frame, &subjects);
        FrameResult {
            subjects,
            annotated,
        }
    }

    pub fn increase_threshold(&mut self) -> u8 {
        let threshold = self.detector.adjust_threshold(THRESHOLD_STEP);
        log::info!("threshold raised to {threshold}");
        threshold
    }

    pub fn decrease_threshold(&mut self) -> u8 {
        let threshold = self.detector.adjust_threshold(-THRESHOLD_STEP);
        log::info!("threshold lowered to {threshold}");
        threshold
    }

    pub fn toggle_overlay(&mut self) -> bool {
        self.overlay.toggle()
    }

    pub fn switch_overlay_style(&mut self) -> OverlayStyle {
        self.overlay.switch_style()
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => return Flow::Stop,
            Command::ToggleOverlay => {
                self.toggle_overlay();
            }
            Command::SwitchStyle => {
                self.switch_overlay_style();
            }
            Command::IncreaseThreshold => {
                self.increase_threshold();
            }
            Command::DecreaseThreshold => {
                self.decrease_threshold();
            }
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn session() -> Session {
        let mut config = Config::default();
        config.overlay.seed = Some(1);
        Session::new(config).expect("default config is valid")
    }

    #[test]
    fn threshold_steps_and_clamps() {
        let mut session = session();
        assert_eq!(session.increase_threshold(), 160);
        assert_eq!(session.decrease_threshold(), 150);

        for _ in 0..30 {
            session.increase_threshold();
        }
        assert_eq!(session.threshold(), 255);
        for _ in 0..30 {
            session.decrease_threshold();
        }
        assert_eq!(session.threshold(), 0);
    }

    #[test]
    fn commands_drive_controls() {
        let mut session = session();
        assert_eq!(session.apply(Command::IncreaseThreshold), Flow::Continue);
        assert_eq!(session.threshold(), 160);
        assert_eq!(session.apply(Command::ToggleOverlay), Flow::Continue);
        assert!(!session.overlay().is_enabled());
        assert_eq!(session.apply(Command::SwitchStyle), Flow::Continue);
        assert_eq!(session.overlay().style(), OverlayStyle::Glitch);
        assert!(session.overlay().is_enabled());
        assert_eq!(session.apply(Command::Quit), Flow::Stop);
    }

    #[test]
    fn process_keeps_frame_shape() {
        let mut session = session();
        let mut frame = RgbImage::new(64, 48);
        for y in 10..20 {
            for x in 10..20 {
                frame.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let result = session.process(frame);
        assert_eq!(result.subjects.len(), 1);
        assert_eq!(result.annotated.dimensions(), (64, 48));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = Config::default();
        config.overlay.colors.clear();
        assert!(Session::new(config).is_err());
    }
}
