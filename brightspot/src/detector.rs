// THEORY:
// The `detector` module is the top-level API of the detection side of the
// engine. It hides the spatial stack (intensity field, region extraction,
// subject building, ranking) behind one call: a frame goes in, a ranked list
// of subjects comes out.
//
// The detector is deliberately forgiving per frame. An empty scene, a polygon
// with no area, a region that is too small or too large: all of these simply
// produce fewer subjects. Configuration problems are the only failures, and
// they are reported once by `Detector::new`.
//
// The threshold is the one piece of mutable state. It is written between
// frames by the runtime controls and always clamped to the valid intensity
// range on write.

use crate::config::DetectionConfig;
use crate::core_modules::intensity::intensity;
use crate::core_modules::ranker;
use crate::core_modules::region_extractor::region_extractor;
use crate::core_modules::subject::SubjectBuilder;
use crate::error::ConfigError;
use image::RgbImage;

pub use crate::core_modules::subject::Subject;

/// Per-frame bright region detector.
#[derive(Debug, Clone)]
pub struct Detector {
    threshold: u8,
    builder: SubjectBuilder,
    max_subjects: usize,
}

impl Detector {
    pub fn new(config: &DetectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            threshold: config.threshold,
            builder: SubjectBuilder::from_config(config),
            max_subjects: config.max_subjects,
        })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Sets the threshold, clamping into `0..=255`.
    pub fn set_threshold(&mut self, threshold: i32) {
        self.threshold = threshold.clamp(0, u8::MAX as i32) as u8;
    }

    /// Moves the threshold by `delta`, clamping into `0..=255`.
    pub fn adjust_threshold(&mut self, delta: i32) -> u8 {
        self.set_threshold(self.threshold as i32 + delta);
        self.threshold
    }

    /// Runs the full pipeline on one frame.
    pub fn detect(&self, frame: &RgbImage) -> Vec<Subject> {
        // Stage 1: Intensity Field
        let gray = intensity::to_gray(frame);

        // Stage 2: Region Extraction
        let regions = region_extractor::extract_from_gray(&gray, self.threshold);
        let region_count = regions.len();

        // Stage 3: Subject Building (area gate, centroid, masked brightness)
        let subjects: Vec<Subject> = regions
            .into_iter()
            .filter_map(|region| self.builder.build(region, &gray))
            .collect();

        // Stage 4: Ranking
        let qualified = subjects.len();
        let ranked = ranker::select(subjects, self.max_subjects);

        log::debug!(
            "threshold {}: {} regions, {} qualified, {} kept",
            self.threshold,
            region_count,
            qualified,
            ranked.len()
        );
        ranked
    }
}
