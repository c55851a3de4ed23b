//! Sparkle field
//!
//! New sparks of a narrow hue band appear at random pixels each frame. All
//! brightness values decay and smear into their neighbours, so every spark
//! spreads out and fades back to black.

use fastrand::Rng;

use super::Routine;
use crate::color::{ColorModel, Rgbw};
use crate::error::{Error, ensure_finite};

const DEFAULT_BASE_HUE: f32 = 0.55;
const DEFAULT_HUE_RANGE: f32 = 0.05;
const DEFAULT_NEW_SPARKS: usize = 5;
const DEFAULT_FADE_FACTOR: f32 = 0.98;
const DEFAULT_WHITE_RATIO: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleConfig {
    /// Centre hue for new sparks
    pub base_hue: f32,
    /// Maximum deviation above or below `base_hue`
    pub hue_range: f32,
    /// Number of sparks added per frame
    pub new_sparks: usize,
    /// Multiplier applied to every brightness per frame
    pub fade_factor: f32,
    /// White level as a fraction of each pixel's brightness
    pub white_ratio: f32,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            base_hue: DEFAULT_BASE_HUE,
            hue_range: DEFAULT_HUE_RANGE,
            new_sparks: DEFAULT_NEW_SPARKS,
            fade_factor: DEFAULT_FADE_FACTOR,
            white_ratio: DEFAULT_WHITE_RATIO,
        }
    }
}

impl SparkleConfig {
    #[must_use]
    pub const fn with_hue(mut self, base_hue: f32, hue_range: f32) -> Self {
        self.base_hue = base_hue;
        self.hue_range = hue_range;
        self
    }

    #[must_use]
    pub const fn with_new_sparks(mut self, new_sparks: usize) -> Self {
        self.new_sparks = new_sparks;
        self
    }

    #[must_use]
    pub const fn with_fade_factor(mut self, fade_factor: f32) -> Self {
        self.fade_factor = fade_factor;
        self
    }

    #[must_use]
    pub const fn with_white_ratio(mut self, white_ratio: f32) -> Self {
        self.white_ratio = white_ratio;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        ensure_finite("sparkle base hue", self.base_hue)?;
        ensure_finite("sparkle hue range", self.hue_range)?;
        ensure_finite("sparkle fade factor", self.fade_factor)?;
        ensure_finite("sparkle white ratio", self.white_ratio)?;
        Ok(())
    }
}

/// State of a single pixel in the field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spark {
    pub hue: f32,
    pub brightness: f32,
}

/// Sparkle field over `N` pixels
#[derive(Debug, Clone)]
pub struct SparkleRoutine<const N: usize> {
    config: SparkleConfig,
    sparks: [Spark; N],
    rng: Rng,
}

impl<const N: usize> SparkleRoutine<N> {
    /// Create a dark field. The seed fixes the sequence of sparks.
    pub fn new(config: SparkleConfig, seed: u64) -> Self {
        let mut rng = Rng::with_seed(seed);
        let sparks = core::array::from_fn(|_| Spark {
            hue: random_hue(&mut rng, &config),
            brightness: 0.0,
        });
        Self { config, sparks, rng }
    }

    pub const fn config(&self) -> &SparkleConfig {
        &self.config
    }

    pub const fn sparks(&self) -> &[Spark; N] {
        &self.sparks
    }

    /// Sum of all pixel brightness values
    pub fn total_brightness(&self) -> f32 {
        self.sparks.iter().map(|spark| spark.brightness).sum()
    }

    /// Light a fresh spark at full brightness. Out of range indices are ignored.
    pub fn ignite(&mut self, index: usize) {
        let hue = random_hue(&mut self.rng, &self.config);
        if let Some(spark) = self.sparks.get_mut(index) {
            *spark = Spark {
                hue,
                brightness: 1.0,
            };
        }
    }

    /// Three tap 1:2:1 blur over the brightness values, wrapping at the ends
    fn smear(&mut self) {
        let previous = self.sparks;
        for (i, spark) in self.sparks.iter_mut().enumerate() {
            let before = previous[(i + N - 1) % N].brightness;
            let after = previous[(i + 1) % N].brightness;
            spark.brightness = (before + previous[i].brightness * 2.0 + after) / 4.0;
        }
    }
}

impl<const N: usize> Routine for SparkleRoutine<N> {
    fn render(&mut self, model: &ColorModel, leds: &mut [Rgbw]) {
        if N == 0 {
            return;
        }

        for spark in &mut self.sparks {
            spark.brightness *= self.config.fade_factor;
        }
        self.smear();
        for _ in 0..self.config.new_sparks {
            let index = self.rng.usize(..N);
            self.ignite(index);
        }

        for (led, spark) in leds.iter_mut().zip(self.sparks.iter()) {
            let white = self.config.white_ratio * spark.brightness;
            *led = model.hsv_to_rgbw(spark.hue, 1.0, spark.brightness, Some(white));
        }
    }

    fn reset(&mut self) {
        for spark in &mut self.sparks {
            spark.brightness = 0.0;
        }
    }
}

fn random_hue(rng: &mut Rng, config: &SparkleConfig) -> f32 {
    config.base_hue + (rng.f32() * 2.0 - 1.0) * config.hue_range
}
