use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use smart_leds::White;

use super::Rgbw8;

/// Real-valued RGBW color
///
/// Components are conventionally in `0.0..=1.0`, but blend sums may exceed
/// that range; nothing here clamps. Clamping happens when the value is
/// projected to hardware range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgbw {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub w: f32,
}

impl Rgbw {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, w: f32) -> Self {
        Self { r, g, b, w }
    }

    /// Components scaled to the 8-bit range (`value * 255`) without clamping
    pub fn scaled8(self) -> [f32; 4] {
        [self.r * 255.0, self.g * 255.0, self.b * 255.0, self.w * 255.0]
    }

    /// Project to an 8-bit hardware value
    ///
    /// Out of range components saturate at 0 and 255.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgbw8(self) -> Rgbw8 {
        let [r, g, b, w] = self.scaled8();
        Rgbw8 {
            r: r as u8,
            g: g as u8,
            b: b as u8,
            a: White(w as u8),
        }
    }
}

impl Add for Rgbw {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
            w: self.w + other.w,
        }
    }
}

impl AddAssign for Rgbw {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<f32> for Rgbw {
    type Output = Self;

    fn mul(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            w: self.w * factor,
        }
    }
}

impl Mul<Rgbw> for f32 {
    type Output = Rgbw;

    fn mul(self, color: Rgbw) -> Rgbw {
        color * self
    }
}

impl Sum for Rgbw {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::BLACK, Add::add)
    }
}

impl From<(f32, f32, f32, f32)> for Rgbw {
    fn from((r, g, b, w): (f32, f32, f32, f32)) -> Self {
        Self::new(r, g, b, w)
    }
}
