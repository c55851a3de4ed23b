//! Routine cycling for a two-button dimmer switch
//!
//! Transport is someone else's problem: whatever receives the switch
//! messages hands the raw payload to [`RoutineCycler::handle_payload`].

use log::debug;

use crate::error::Error;
use crate::intent_processor::LightsHandle;
use crate::source::Preset;

/// Button that steps forward through the routine list
pub const BUTTON_NEXT: u8 = 1;
/// Button that steps backwards through the routine list
pub const BUTTON_PREVIOUS: u8 = 4;

/// What a button did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Hold,
    ShortRelease,
    LongRelease,
}

impl ButtonAction {
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Press,
            1 => Self::Hold,
            2 => Self::ShortRelease,
            3 => Self::LongRelease,
            _ => return None,
        })
    }

    /// Hold and short release both count as a press of the button
    pub const fn is_press(self) -> bool {
        matches!(self, Self::Hold | Self::ShortRelease)
    }
}

/// Decoded `"<button>00<code>"` switch payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: u8,
    pub action: ButtonAction,
}

impl ButtonEvent {
    pub fn parse(payload: &str) -> Option<Self> {
        let bytes = payload.trim().as_bytes();
        if bytes.len() != 4 {
            return None;
        }
        let digit = |byte: u8| byte.is_ascii_digit().then(|| byte - b'0');
        let button = digit(bytes[0])?;
        let action = ButtonAction::from_code(digit(bytes[3])?)?;
        Some(Self { button, action })
    }

    /// Step through the routine list this event asks for, if any
    pub const fn delta(&self) -> Option<i32> {
        if !self.action.is_press() {
            return None;
        }
        match self.button {
            BUTTON_NEXT => Some(1),
            BUTTON_PREVIOUS => Some(-1),
            _ => None,
        }
    }
}

/// Cycles through an externally owned list of presets
pub struct RoutineCycler<'a, 'h, const SIZE: usize> {
    presets: &'a [Preset],
    index: usize,
    lights: LightsHandle<'h, SIZE>,
}

impl<'a, 'h, const SIZE: usize> RoutineCycler<'a, 'h, SIZE> {
    /// Create a cycler positioned at the first preset. Nothing is selected yet.
    pub fn new(presets: &'a [Preset], lights: LightsHandle<'h, SIZE>) -> Result<Self, Error> {
        if presets.is_empty() {
            return Err(Error::EmptyRoutineList);
        }
        for preset in presets {
            preset.validate()?;
        }
        Ok(Self {
            presets,
            index: 0,
            lights,
        })
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Preset {
        &self.presets[self.index]
    }

    /// Move `delta` places through the list, wrapping at both ends, and
    /// select the preset there
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn step(&mut self, delta: i32) -> Result<(), Error> {
        let len = self.presets.len() as i64;
        let index = (self.index as i64 + i64::from(delta)).rem_euclid(len) as usize;
        let preset = self.presets[index];
        self.lights.select(preset)?;
        self.index = index;
        debug!("switched to preset {} ({})", index, preset.name());
        Ok(())
    }

    /// Handle a raw switch payload
    ///
    /// Returns whether the payload caused a selection. Unknown payloads and
    /// buttons are ignored.
    pub fn handle_payload(&mut self, payload: &str) -> Result<bool, Error> {
        let Some(delta) = ButtonEvent::parse(payload).and_then(|event| event.delta()) else {
            return Ok(false);
        };
        self.step(delta)?;
        Ok(true)
    }
}
