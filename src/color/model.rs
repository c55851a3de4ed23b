//! Perceptual HSV to RGBW transform
//!
//! The RGB chips are driven at full saturation and dimmed by the remapped
//! saturation, while the white chip takes up the remainder. This is not a
//! physically accurate model, it just looks right on RGBW strips.

use super::{Hsv, Rgbw, hsv2rgb};
use crate::error::{Error, ensure_finite};

const DEFAULT_SATURATION: f32 = 2.0;
const DEFAULT_GAMMA: f32 = 2.0;
const DEFAULT_BRIGHTNESS: f32 = 1.0;

/// Initial knob values for a [`ColorModel`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorModelConfig {
    /// Global brightness, clamped to `0.0..=1.0`
    pub brightness: f32,
    /// Saturation curve exponent, floored at 0
    pub saturation: f32,
    /// Gamma applied to the RGB channels, floored at 0
    pub gamma: f32,
}

impl Default for ColorModelConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            saturation: DEFAULT_SATURATION,
            gamma: DEFAULT_GAMMA,
        }
    }
}

impl ColorModelConfig {
    #[must_use]
    pub const fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub const fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    #[must_use]
    pub const fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }
}

/// Stateful color transform shared by every routine
#[derive(Debug, Clone, PartialEq)]
pub struct ColorModel {
    saturation: f32,
    gamma: f32,
    brightness: f32,
}

impl Default for ColorModel {
    fn default() -> Self {
        Self {
            saturation: DEFAULT_SATURATION,
            gamma: DEFAULT_GAMMA,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl ColorModel {
    /// Create a color model, clamping knobs into their domains
    pub fn new(config: &ColorModelConfig) -> Result<Self, Error> {
        let mut model = Self::default();
        model.set_brightness(config.brightness)?;
        model.set_saturation(config.saturation)?;
        model.set_gamma(config.gamma)?;
        Ok(model)
    }

    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    pub const fn saturation(&self) -> f32 {
        self.saturation
    }

    pub const fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Set global brightness, clamped to `0.0..=1.0`
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), Error> {
        self.brightness = ensure_finite("brightness", brightness)?.clamp(0.0, 1.0);
        Ok(())
    }

    /// Set the saturation curve exponent, floored at 0
    pub fn set_saturation(&mut self, saturation: f32) -> Result<(), Error> {
        self.saturation = ensure_finite("saturation", saturation)?.max(0.0);
        Ok(())
    }

    /// Set the RGB gamma exponent, floored at 0
    pub fn set_gamma(&mut self, gamma: f32) -> Result<(), Error> {
        self.gamma = ensure_finite("gamma", gamma)?.max(0.0);
        Ok(())
    }

    /// Convert HSV to RGBW
    ///
    /// When `white` is given it overrides the derived white level, still
    /// scaled by brightness. Gamma is applied to R, G and B only.
    pub fn hsv_to_rgbw(&self, hue: f32, sat: f32, value: f32, white: Option<f32>) -> Rgbw {
        let sat = if self.saturation > 0.0 {
            libm::powf(sat, 1.0 / self.saturation)
        } else {
            0.0
        };

        let intensity = value * self.brightness * sat;
        let (r, g, b) = hsv2rgb(Hsv::new(hue, 1.0, intensity));
        let w = match white {
            Some(white) => white * self.brightness,
            None => (1.0 - sat) * value * self.brightness,
        };

        Rgbw {
            r: libm::powf(r, self.gamma),
            g: libm::powf(g, self.gamma),
            b: libm::powf(b, self.gamma),
            w,
        }
    }

    /// Convert an [`Hsv`] triple with the derived white level
    pub fn convert(&self, hsv: Hsv) -> Rgbw {
        self.hsv_to_rgbw(hsv.hue, hsv.sat, hsv.val, None)
    }
}
