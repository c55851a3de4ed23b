//! Hardware sinks
//!
//! The compositor never talks to hardware itself. A [`FrameScheduler`]
//! pushes finished frames into an [`OutputDriver`].
//!
//! [`FrameScheduler`]: crate::FrameScheduler

use heapless::Vec;
use log::{info, warn};
use smart_leds::SmartLedsWrite;

use crate::color::{Rgbw, Rgbw8};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
pub trait OutputDriver {
    /// Stage colors for the strip
    fn write(&mut self, colors: &[Rgbw]);

    /// Latch staged colors to the physical output
    fn show(&mut self);

    /// Global output brightness in `0.0..=1.0`
    fn brightness(&self) -> f32 {
        1.0
    }

    /// Set global output brightness
    fn set_brightness(&mut self, _brightness: f32) {}
}

/// Sink for running without hardware, frames stay in memory
#[derive(Debug, Default)]
pub struct NullOutput;

impl NullOutput {
    pub fn new() -> Self {
        info!("no LED driver available, rendering in memory only");
        Self
    }
}

impl OutputDriver for NullOutput {
    fn write(&mut self, _colors: &[Rgbw]) {}

    fn show(&mut self) {}
}

/// Adapter for any `smart-leds` RGBW writer with up to `N` pixels
pub struct SmartLedsOutput<W, const N: usize> {
    writer: W,
    brightness: f32,
    staged: Vec<Rgbw8, N>,
}

impl<W, const N: usize> SmartLedsOutput<W, N>
where
    W: SmartLedsWrite<Color = Rgbw8>,
    W::Error: core::fmt::Debug,
{
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            brightness: 1.0,
            staged: Vec::new(),
        }
    }

    /// Colors staged by the last `write`
    pub fn staged(&self) -> &[Rgbw8] {
        &self.staged
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, const N: usize> OutputDriver for SmartLedsOutput<W, N>
where
    W: SmartLedsWrite<Color = Rgbw8>,
    W::Error: core::fmt::Debug,
{
    fn write(&mut self, colors: &[Rgbw]) {
        self.staged.clear();
        for color in colors.iter().take(N) {
            // Capacity is N and at most N colors are taken
            let _ = self.staged.push((*color * self.brightness).to_rgbw8());
        }
    }

    fn show(&mut self) {
        if let Err(error) = self.writer.write(self.staged.iter().copied()) {
            warn!("failed to write LED frame: {:?}", error);
        }
    }

    fn brightness(&self) -> f32 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness.clamp(0.0, 1.0);
    }
}
