// THEORY:
// The glitch overlay is the stateful renderer. Instead of plain rings it
// surrounds each subject with jittering decoy numbers and a label that is
// sometimes the subject's true rank and sometimes a fake error code. The
// mislabeling is the intended look.
//
// State model:
// - One `GlitchState` per slot, where a slot is the subject's rank index in the
//   current frame. There is no identity tracking, so when the subject count or
//   ordering changes, a slot's animation simply continues on whichever subject
//   now holds that rank.
// - Slots are created lazily the first time a rank is drawn and are never
//   evicted. `clear_state` is the only way to drop them.
// - Two timers per slot drive the animation: `glitch_timer` re-rolls the jitter
//   offset once it passes 20, `flicker_timer` re-rolls the decoy data stream
//   once it passes 5. Both reset to 0 when they fire.
//
// All randomness comes from one `StdRng` owned by the renderer. A seed in the
// config makes the whole animation reproducible.

use crate::config::OverlayConfig;
use crate::core_modules::subject::Subject;
use crate::error::ConfigError;
use crate::overlay::Overlay;
use crate::overlay::glyphs;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

pub const DATA_STREAM_LEN: usize = 30;
const DATA_VALUE_LIMIT: u32 = 9999;
const GLITCH_PERIOD: u32 = 20;
const FLICKER_PERIOD: u32 = 5;
const JITTER: f64 = 3.0;
const DECOY_COUNT: usize = 3;
const DECOY_SPREAD: i32 = 15;
const LABEL_OFFSET: (i32, i32) = (10, -10);
const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT_SCALE: u32 = 1;

/// Animation state for one rank slot.
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchState {
    /// Horizontal jitter applied to everything drawn for this slot.
    pub offset_x: f64,
    /// Vertical jitter applied to everything drawn for this slot.
    pub offset_y: f64,
    /// Decoy values in `0..9999`; only the first few are ever drawn.
    pub data_stream: [u32; DATA_STREAM_LEN],
    pub glitch_timer: u32,
    pub flicker_timer: u32,
}

impl GlitchState {
    /// Fresh state with random jitter, data and timer phase.
    fn random(rng: &mut StdRng) -> Self {
        Self {
            offset_x: rng.random_range(-JITTER..JITTER),
            offset_y: rng.random_range(-JITTER..JITTER),
            data_stream: random_stream(rng),
            glitch_timer: rng.random_range(0..=GLITCH_PERIOD),
            flicker_timer: rng.random_range(0..=FLICKER_PERIOD),
        }
    }

    /// Advances both timers by one draw and applies any re-roll that fires.
    fn advance(&mut self, rng: &mut StdRng) {
        self.glitch_timer += 1;
        self.flicker_timer += 1;

        if self.glitch_timer > GLITCH_PERIOD {
            self.offset_x = rng.random_range(-JITTER..JITTER);
            self.offset_y = rng.random_range(-JITTER..JITTER);
            self.glitch_timer = 0;
        }

        if self.flicker_timer > FLICKER_PERIOD {
            self.data_stream = random_stream(rng);
            self.flicker_timer = 0;
        }
    }

    /// Jitter truncated toward zero, as applied to pixel positions.
    fn offset(&self) -> (i32, i32) {
        (self.offset_x as i32, self.offset_y as i32)
    }
}

fn random_stream(rng: &mut StdRng) -> [u32; DATA_STREAM_LEN] {
    std::array::from_fn(|_| rng.random_range(0..DATA_VALUE_LIMIT))
}

pub struct GlitchOverlay {
    enabled: bool,
    rng: StdRng,
    states: BTreeMap<usize, GlitchState>,
}

impl GlitchOverlay {
    pub fn new(config: &OverlayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            enabled: config.enabled,
            rng,
            states: BTreeMap::new(),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// State of the slot for `rank`, if that rank has ever been drawn.
    pub fn glitch_state(&self, rank: usize) -> Option<&GlitchState> {
        self.states.get(&rank)
    }

    /// Number of slots created so far.
    pub fn slot_count(&self) -> usize {
        self.states.len()
    }

    /// Drops every slot; the next draw starts from fresh random state.
    pub fn clear_state(&mut self) {
        self.states.clear();
    }

    fn draw_slot(&mut self, frame: &mut RgbImage, rank: usize, anchor: (i32, i32)) {
        let rng = &mut self.rng;
        let state = self
            .states
            .entry(rank)
            .or_insert_with(|| GlitchState::random(rng));
        state.advance(rng);

        let (x, y) = anchor;
        let (dx, dy) = state.offset();

        // Decoy numbers scattered around the subject, fresh positions every call.
        for value in state.data_stream.iter().take(DECOY_COUNT) {
            let decoy_x = x + rng.random_range(-DECOY_SPREAD..=DECOY_SPREAD) + dx;
            let decoy_y = y + rng.random_range(-DECOY_SPREAD..=DECOY_SPREAD) + dy;
            glyphs::draw_text_mut(
                frame,
                &format!("{value:04}"),
                (decoy_x, decoy_y),
                TEXT_SCALE,
                TEXT_COLOR,
            );
        }

        // The label tells the truth about half the time.
        let label = if rng.random::<f64>() > 0.5 {
            format!("ID:{rank:02}")
        } else {
            format!("ERR:{:02}", rng.random_range(0..=99u32))
        };
        glyphs::draw_text_mut(
            frame,
            &label,
            (x + LABEL_OFFSET.0 + dx, y + LABEL_OFFSET.1 + dy),
            TEXT_SCALE,
            TEXT_COLOR,
        );
    }
}

impl Overlay for GlitchOverlay {
    fn draw(&mut self, mut frame: RgbImage, subjects: &[Subject]) -> RgbImage {
        if !self.enabled {
            return frame;
        }

        for (rank, subject) in subjects.iter().enumerate() {
            self.draw_slot(&mut frame, rank, subject.anchor());
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
