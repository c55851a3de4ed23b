//! Things that can be selected onto the lights
//!
//! [`Preset`] is the small, copyable description an event source keeps in
//! its routine list and sends across contexts. [`Source`] is the live value
//! the compositor owns and renders.

use crate::color::{ColorModel, Hsv, Rgbw};
use crate::error::{Error, ensure_finite};
use crate::routine::{
    ROUTINE_NAME_RAINBOW, ROUTINE_NAME_SPARKLE, RainbowConfig, RainbowRoutine, RoutineSlot,
    SparkleConfig, SparkleRoutine,
};

const PRESET_NAME_HSV: &str = "hsv";
const PRESET_NAME_RGBW: &str = "rgbw";
const PRESET_NAME_OFF: &str = "off";

/// A resolvable frame source
#[derive(Debug, Clone)]
pub enum Source<const N: usize> {
    /// Constant HSV, converted through the color model
    Hsv(Hsv),
    /// Constant RGBW, broadcast as is
    Rgbw(Rgbw),
    /// Animated routine
    Routine(RoutineSlot<N>),
}

impl<const N: usize> Source<N> {
    /// Resolve into `leds`, advancing animated routines by one frame
    pub fn render(&mut self, model: &ColorModel, leds: &mut [Rgbw]) {
        match self {
            Self::Hsv(hsv) => leds.fill(model.convert(*hsv)),
            Self::Rgbw(color) => leds.fill(*color),
            Self::Routine(routine) => routine.render(model, leds),
        }
    }
}

impl<const N: usize> From<Hsv> for Source<N> {
    fn from(hsv: Hsv) -> Self {
        Self::Hsv(hsv)
    }
}

impl<const N: usize> From<Rgbw> for Source<N> {
    fn from(color: Rgbw) -> Self {
        Self::Rgbw(color)
    }
}

impl<const N: usize> From<RoutineSlot<N>> for Source<N> {
    fn from(routine: RoutineSlot<N>) -> Self {
        Self::Routine(routine)
    }
}

impl<const N: usize> From<RainbowRoutine> for Source<N> {
    fn from(routine: RainbowRoutine) -> Self {
        Self::Routine(routine.into())
    }
}

impl<const N: usize> From<SparkleRoutine<N>> for Source<N> {
    fn from(routine: SparkleRoutine<N>) -> Self {
        Self::Routine(routine.into())
    }
}

impl<const N: usize> TryFrom<&[f32]> for Source<N> {
    type Error = Error;

    fn try_from(components: &[f32]) -> Result<Self, Error> {
        Ok(Preset::try_from(components)?.into_source(0))
    }
}

/// Selectable routine or constant color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preset {
    Rainbow(RainbowConfig),
    Sparkle(SparkleConfig),
    Hsv(Hsv),
    Rgbw(Rgbw),
}

/// The routine list a dimmer switch cycles through
pub const DEFAULT_PRESETS: [Preset; 4] = [
    Preset::Rainbow(RainbowConfig { white: 0.3 }),
    Preset::Sparkle(SparkleConfig {
        base_hue: 0.55,
        hue_range: 0.05,
        new_sparks: 5,
        fade_factor: 0.98,
        white_ratio: 0.4,
    }),
    Preset::Rgbw(Rgbw::new(0.1, 0.0, 0.0, 1.0)),
    Preset::Rgbw(Rgbw::BLACK),
];

impl Preset {
    /// Build the live source. `seed` drives randomized routines.
    pub fn into_source<const N: usize>(self, seed: u64) -> Source<N> {
        match self {
            Self::Rainbow(config) => RainbowRoutine::new(config).into(),
            Self::Sparkle(config) => SparkleRoutine::<N>::new(config, seed).into(),
            Self::Hsv(hsv) => Source::Hsv(hsv),
            Self::Rgbw(color) => Source::Rgbw(color),
        }
    }

    /// Reject non-finite tuning values
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Rainbow(config) => config.validate(),
            Self::Sparkle(config) => config.validate(),
            Self::Hsv(hsv) => {
                for value in [hsv.hue, hsv.sat, hsv.val] {
                    ensure_finite("hsv component", value)?;
                }
                Ok(())
            }
            Self::Rgbw(color) => {
                for value in [color.r, color.g, color.b, color.w] {
                    ensure_finite("rgbw component", value)?;
                }
                Ok(())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rainbow(_) => ROUTINE_NAME_RAINBOW,
            Self::Sparkle(_) => ROUTINE_NAME_SPARKLE,
            Self::Hsv(_) => PRESET_NAME_HSV,
            Self::Rgbw(color) if *color == Rgbw::BLACK => PRESET_NAME_OFF,
            Self::Rgbw(_) => PRESET_NAME_RGBW,
        }
    }

    /// Look up a preset with default tuning by name
    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            ROUTINE_NAME_RAINBOW => Some(Self::Rainbow(RainbowConfig::default())),
            ROUTINE_NAME_SPARKLE => Some(Self::Sparkle(SparkleConfig::default())),
            PRESET_NAME_OFF => Some(Self::Rgbw(Rgbw::BLACK)),
            _ => None,
        }
    }
}

impl TryFrom<&[f32]> for Preset {
    type Error = Error;

    /// Three components are HSV, four are RGBW
    fn try_from(components: &[f32]) -> Result<Self, Error> {
        let preset = match *components {
            [hue, sat, val] => Self::Hsv(Hsv::new(hue, sat, val)),
            [r, g, b, w] => Self::Rgbw(Rgbw::new(r, g, b, w)),
            _ => return Err(Error::InvalidArity(components.len())),
        };
        preset.validate()?;
        Ok(preset)
    }
}

impl From<Hsv> for Preset {
    fn from(hsv: Hsv) -> Self {
        Self::Hsv(hsv)
    }
}

impl From<Rgbw> for Preset {
    fn from(color: Rgbw) -> Self {
        Self::Rgbw(color)
    }
}
