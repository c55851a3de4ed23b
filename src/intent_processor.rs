//! Intent processing module
//!
//! Event sources run in a different context than the render loop. They send
//! intents through a critical-section channel, and the render context drains
//! them between frames, so the live set is never touched mid-render.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::Duration;
use fastrand::Rng;
use log::{debug, warn};

use crate::error::{Error, ensure_finite};
use crate::lights::Lights;
use crate::source::Preset;

/// Intent to change what the lights show or how
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightsIntent {
    /// Fade to a new routine or constant color
    Select(Preset),
    /// Color model brightness
    Brightness(f32),
    /// Color model saturation exponent
    Saturation(f32),
    /// Color model gamma
    Gamma(f32),
    /// Crossfade duration
    FadeDuration(Duration),
    /// Hardware brightness
    OutputBrightness(f32),
}

impl LightsIntent {
    /// Check that the intent can be applied without error
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Select(preset) => preset.validate(),
            Self::Brightness(value) => ensure_finite("brightness", *value).map(|_| ()),
            Self::Saturation(value) => ensure_finite("saturation", *value).map(|_| ()),
            Self::Gamma(value) => ensure_finite("gamma", *value).map(|_| ()),
            Self::OutputBrightness(value) => {
                ensure_finite("output brightness", *value).map(|_| ())
            }
            Self::FadeDuration(_) => Ok(()),
        }
    }
}

/// Side effects from processing intents that the scheduler should apply
#[derive(Debug, Clone, Default)]
pub struct IntentEffects {
    /// New hardware brightness
    pub output_brightness: Option<f32>,
}

impl IntentEffects {
    /// Check if any effects need to be applied
    pub const fn has_effects(&self) -> bool {
        self.output_brightness.is_some()
    }
}

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<CriticalSectionRawMutex, LightsIntent, SIZE>;

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> =
    Sender<'a, CriticalSectionRawMutex, LightsIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> =
    Receiver<'a, CriticalSectionRawMutex, LightsIntent, SIZE>;

/// Validating front end for the intent channel
///
/// Configuration errors are returned here, to the caller, instead of
/// surfacing later in the render context.
#[derive(Clone)]
pub struct LightsHandle<'a, const SIZE: usize> {
    intents: IntentSender<'a, SIZE>,
}

impl<'a, const SIZE: usize> LightsHandle<'a, SIZE> {
    pub const fn new(intents: IntentSender<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Validate and enqueue an intent
    pub fn send(&self, intent: LightsIntent) -> Result<(), Error> {
        intent.validate()?;
        self.intents.try_send(intent).map_err(|_| Error::QueueFull)
    }

    pub fn select(&self, preset: Preset) -> Result<(), Error> {
        self.send(LightsIntent::Select(preset))
    }

    pub fn set_brightness(&self, brightness: f32) -> Result<(), Error> {
        self.send(LightsIntent::Brightness(brightness))
    }

    pub fn set_fade_duration(&self, fade_duration: Duration) -> Result<(), Error> {
        self.send(LightsIntent::FadeDuration(fade_duration))
    }

    pub fn set_output_brightness(&self, brightness: f32) -> Result<(), Error> {
        self.send(LightsIntent::OutputBrightness(brightness))
    }
}

/// Applies queued intents to the compositor
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
    seeds: Rng,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    /// Create a new intent processor. `seed` drives randomized routines.
    pub fn new(intents: IntentReceiver<'a, SIZE>, seed: u64) -> Self {
        Self {
            intents,
            seeds: Rng::with_seed(seed),
        }
    }

    /// Process all pending intents from the channel (non-blocking)
    ///
    /// Intents were validated when sent; a knob that still fails to apply
    /// is logged and skipped.
    pub fn process_pending<const N: usize, const SLOTS: usize>(
        &mut self,
        lights: &mut Lights<N, SLOTS>,
    ) -> IntentEffects {
        let mut effects = IntentEffects::default();

        while let Ok(intent) = self.intents.try_receive() {
            debug!("processing intent {:?}", intent);
            let applied = match intent {
                LightsIntent::Select(preset) => {
                    lights.select(preset.into_source::<N>(self.seeds.u64(..)));
                    Ok(())
                }
                LightsIntent::Brightness(value) => lights.color_model_mut().set_brightness(value),
                LightsIntent::Saturation(value) => lights.color_model_mut().set_saturation(value),
                LightsIntent::Gamma(value) => lights.color_model_mut().set_gamma(value),
                LightsIntent::FadeDuration(duration) => {
                    lights.set_fade_duration(duration);
                    Ok(())
                }
                LightsIntent::OutputBrightness(value) => {
                    effects.output_brightness = Some(value.clamp(0.0, 1.0));
                    Ok(())
                }
            };
            if let Err(error) = applied {
                warn!("dropping intent: {}", error);
            }
        }

        effects
    }
}
