//! Rainbow sweep
//!
//! Four full hue cycles spread over the strip, shifted by one pixel per
//! frame.

use super::Routine;
use crate::color::{ColorModel, Rgbw};
use crate::error::{Error, ensure_finite};

const DEFAULT_WHITE: f32 = 0.3;
const HUE_CYCLES: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainbowConfig {
    /// Fixed white level mixed into every pixel
    pub white: f32,
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self {
            white: DEFAULT_WHITE,
        }
    }
}

impl RainbowConfig {
    #[must_use]
    pub const fn with_white(mut self, white: f32) -> Self {
        self.white = white;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        ensure_finite("rainbow white level", self.white)?;
        Ok(())
    }
}

/// Looping rainbow sweep
#[derive(Debug, Clone, Default)]
pub struct RainbowRoutine {
    config: RainbowConfig,
    /// Current phase in pixels, always below the strip length
    offset: usize,
}

impl RainbowRoutine {
    pub const fn new(config: RainbowConfig) -> Self {
        Self { config, offset: 0 }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn config(&self) -> &RainbowConfig {
        &self.config
    }
}

impl Routine for RainbowRoutine {
    #[allow(clippy::cast_precision_loss)]
    fn render(&mut self, model: &ColorModel, leds: &mut [Rgbw]) {
        let len = leds.len();
        if len == 0 {
            return;
        }

        self.offset = (self.offset + 1) % len;
        for (i, led) in leds.iter_mut().enumerate() {
            let position = (i + self.offset) % len;
            let hue = HUE_CYCLES * position as f32 / len as f32;
            *led = model.hsv_to_rgbw(hue, 1.0, 1.0, Some(self.config.white));
        }
    }

    fn reset(&mut self) {
        self.offset = 0;
    }
}
