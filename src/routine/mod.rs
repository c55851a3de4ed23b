//! Animated routines
//!
//! Every routine is stateful: rendering a frame is what advances its
//! animation, there is no separate tick. Routines are stored in an enum so
//! the compositor can hold them without heap allocations.

mod rainbow;
mod sparkle;

pub use rainbow::{RainbowConfig, RainbowRoutine};
pub use sparkle::{Spark, SparkleConfig, SparkleRoutine};

use crate::color::{ColorModel, Rgbw};

pub(crate) const ROUTINE_NAME_RAINBOW: &str = "rainbow";
pub(crate) const ROUTINE_NAME_SPARKLE: &str = "sparkle";

pub trait Routine {
    /// Render a single frame and advance the animation by one step
    fn render(&mut self, model: &ColorModel, leds: &mut [Rgbw]);

    /// Reset routine state
    fn reset(&mut self) {}
}

/// Routine slot - enum containing all animated routines
///
/// `N` is the number of pixels in the strip.
#[derive(Debug, Clone)]
pub enum RoutineSlot<const N: usize> {
    /// Looping rainbow sweep
    Rainbow(RainbowRoutine),
    /// Fading, spreading sparkles
    Sparkle(SparkleRoutine<N>),
}

impl<const N: usize> RoutineSlot<N> {
    /// Render the current routine
    pub fn render(&mut self, model: &ColorModel, leds: &mut [Rgbw]) {
        match self {
            Self::Rainbow(routine) => routine.render(model, leds),
            Self::Sparkle(routine) => routine.render(model, leds),
        }
    }

    /// Reset the routine state
    pub fn reset(&mut self) {
        match self {
            Self::Rainbow(routine) => Routine::reset(routine),
            Self::Sparkle(routine) => Routine::reset(routine),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rainbow(_) => ROUTINE_NAME_RAINBOW,
            Self::Sparkle(_) => ROUTINE_NAME_SPARKLE,
        }
    }
}

impl<const N: usize> From<RainbowRoutine> for RoutineSlot<N> {
    fn from(routine: RainbowRoutine) -> Self {
        Self::Rainbow(routine)
    }
}

impl<const N: usize> From<SparkleRoutine<N>> for RoutineSlot<N> {
    fn from(routine: SparkleRoutine<N>) -> Self {
        Self::Sparkle(routine)
    }
}
