//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::intent_processor::{IntentEffects, IntentProcessor};
use crate::lights::{DEFAULT_SLOTS, Lights};
use crate::output::OutputDriver;

/// Default target frame rate (200 FPS).
pub const DEFAULT_FPS: u32 = 200;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Frames of lag tolerated before the schedule is reset.
///
/// If we fall behind by more than this, we skip the backlog instead of catching up.
pub const MAX_DRIFT_FRAMES: u32 = 2;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Whether a frame was handed to the output.
    pub written: bool,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Applies queued intents before each frame
/// - Tracks frame timing with drift correction
/// - Renders the lights and writes to the output driver
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(lights, intents, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<
    'a,
    O: OutputDriver,
    const N: usize,
    const INTENT_CHANNEL_SIZE: usize,
    const SLOTS: usize = DEFAULT_SLOTS,
> {
    output: O,
    lights: Lights<N, SLOTS>,
    intents: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, const N: usize, const INTENT_CHANNEL_SIZE: usize, const SLOTS: usize>
    FrameScheduler<'a, O, N, INTENT_CHANNEL_SIZE, SLOTS>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (200 FPS) for frame timing.
    pub fn new(
        lights: Lights<N, SLOTS>,
        intents: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
        driver: O,
    ) -> Self {
        Self::with_frame_duration(lights, intents, driver, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        lights: Lights<N, SLOTS>,
        intents: IntentProcessor<'a, INTENT_CHANNEL_SIZE>,
        driver: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            lights,
            intents,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Applies pending intents
    /// 3. Renders the current frame
    /// 4. Writes to the output driver, unless nothing is live
    /// 5. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * MAX_DRIFT_FRAMES;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let effects = self.intents.process_pending(&mut self.lights);
        self.apply_effects(&effects);

        let written = !self.lights.is_empty();
        let frame = self.lights.render(now);
        if written {
            self.output.write(frame);
            self.output.show();
        }

        self.next_frame += self.frame_duration;

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
            written,
        }
    }

    fn apply_effects(&mut self, effects: &IntentEffects) {
        if let Some(brightness) = effects.output_brightness {
            self.output.set_brightness(brightness);
        }
    }

    /// Get a reference to the lights.
    pub fn lights(&self) -> &Lights<N, SLOTS> {
        &self.lights
    }

    /// Get a mutable reference to the lights.
    pub fn lights_mut(&mut self) -> &mut Lights<N, SLOTS> {
        &mut self.lights
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }
}
