//! Crossfading compositor
//!
//! Keeps a small arena of live sources, each with a fade weight. The active
//! source fades towards 1.0 and every other one fades towards 0.0 and is
//! dropped once it reaches it. Each frame is the weighted sum of all live
//! sources.

use embassy_time::{Duration, Instant};
use heapless::Vec;
use log::{debug, warn};

use crate::color::{ColorModel, ColorModelConfig, Rgbw};
use crate::error::Error;
use crate::source::Source;

/// Default number of sources that can be live at once
pub const DEFAULT_SLOTS: usize = 4;

/// Shortest allowed fade
pub const MIN_FADE_DURATION: Duration = Duration::from_millis(10);

const DEFAULT_FADE_DURATION: Duration = Duration::from_secs(1);

/// Configuration for the compositor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightsConfig {
    /// Time to fade a newly selected source fully in
    pub fade_duration: Duration,
    /// Initial color model knobs
    pub color: ColorModelConfig,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            fade_duration: DEFAULT_FADE_DURATION,
            color: ColorModelConfig::default(),
        }
    }
}

impl LightsConfig {
    #[must_use]
    pub const fn with_fade_duration(mut self, fade_duration: Duration) -> Self {
        self.fade_duration = fade_duration;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: ColorModelConfig) -> Self {
        self.color = color;
        self
    }
}

/// A live source with its fade weight
#[derive(Debug, Clone)]
pub struct LiveSource<const N: usize> {
    source: Source<N>,
    weight: f32,
    active: bool,
}

impl<const N: usize> LiveSource<N> {
    pub const fn source(&self) -> &Source<N> {
        &self.source
    }

    /// Fade weight in `0.0..=1.0`
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Compositor over an `N` pixel strip with room for `SLOTS` live sources
pub struct Lights<const N: usize, const SLOTS: usize = DEFAULT_SLOTS> {
    color_model: ColorModel,
    fade_duration: Duration,
    live: Vec<LiveSource<N>, SLOTS>,
    last_frame: Instant,
    frame: [Rgbw; N],
    scratch: [Rgbw; N],
}

impl<const N: usize, const SLOTS: usize> Lights<N, SLOTS> {
    /// Create a dark compositor. `now` is the reference for the first fade.
    pub fn new(config: &LightsConfig, now: Instant) -> Result<Self, Error> {
        Ok(Self {
            color_model: ColorModel::new(&config.color)?,
            fade_duration: config.fade_duration.max(MIN_FADE_DURATION),
            live: Vec::new(),
            last_frame: now,
            frame: [Rgbw::BLACK; N],
            scratch: [Rgbw::BLACK; N],
        })
    }

    /// Number of pixels in the strip
    pub const fn pixel_count(&self) -> usize {
        N
    }

    pub const fn color_model(&self) -> &ColorModel {
        &self.color_model
    }

    pub fn color_model_mut(&mut self) -> &mut ColorModel {
        &mut self.color_model
    }

    pub const fn fade_duration(&self) -> Duration {
        self.fade_duration
    }

    /// Set the fade duration, floored at [`MIN_FADE_DURATION`]
    pub fn set_fade_duration(&mut self, fade_duration: Duration) {
        self.fade_duration = fade_duration.max(MIN_FADE_DURATION);
    }

    /// Make `source` the active one
    ///
    /// It starts at weight 0 and fades in over the following renders, while
    /// the previously active source starts fading out. Nothing is rendered
    /// here.
    pub fn select(&mut self, source: impl Into<Source<N>>) {
        for entry in &mut self.live {
            entry.active = false;
        }

        if self.live.is_full() && !self.live.is_empty() {
            self.evict();
        }

        let entry = LiveSource {
            source: source.into(),
            weight: 0.0,
            active: true,
        };
        if self.live.push(entry).is_err() {
            // Only possible with a zero capacity arena
            warn!("no slots for a live source, selection dropped");
            return;
        }
        debug!("selected source, {} live", self.live.len());
    }

    /// The active source, if anything has been selected
    pub fn active(&self) -> Option<&Source<N>> {
        self.live
            .iter()
            .find(|entry| entry.active)
            .map(|entry| &entry.source)
    }

    /// All live sources in selection order
    pub fn live(&self) -> &[LiveSource<N>] {
        &self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Sum of live weights, never less than 1.0
    ///
    /// The floor keeps a source fading in from black from being scaled up to
    /// full brightness while it is the only one live.
    pub fn total_weight(&self) -> f32 {
        let sum: f32 = self.live.iter().map(|entry| entry.weight).sum();
        sum.max(1.0)
    }

    /// The last rendered frame
    pub const fn frame(&self) -> &[Rgbw; N] {
        &self.frame
    }

    /// Render one frame
    ///
    /// Advances every fade by the time since the previous render, drops
    /// sources that faded out, then blends the rest by their share of the
    /// total weight. With nothing live the frame is black.
    pub fn render(&mut self, now: Instant) -> &[Rgbw; N] {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        self.frame.fill(Rgbw::BLACK);
        if self.live.is_empty() {
            return &self.frame;
        }

        self.fade(elapsed);

        let total_weight = self.total_weight();
        for entry in &mut self.live {
            entry.source.render(&self.color_model, &mut self.scratch);
            let share = entry.weight / total_weight;
            for (pixel, color) in self.frame.iter_mut().zip(self.scratch.iter()) {
                *pixel += *color * share;
            }
        }

        &self.frame
    }

    /// Move weights towards their targets and prune faded out sources
    #[allow(clippy::cast_precision_loss)]
    fn fade(&mut self, elapsed: Duration) {
        let fade = elapsed.as_micros() as f32 / self.fade_duration.as_micros() as f32;
        for entry in &mut self.live {
            entry.weight = if entry.active {
                (entry.weight + fade).min(1.0)
            } else {
                (entry.weight - fade).max(0.0)
            };
        }

        let before = self.live.len();
        self.live.retain(|entry| entry.active || entry.weight > 0.0);
        if self.live.len() != before {
            debug!("pruned {} faded sources", before - self.live.len());
        }
    }

    /// Free a slot for a new selection
    fn evict(&mut self) {
        let victim = self
            .live
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.active)
            .min_by(|(_, a), (_, b)| a.weight.total_cmp(&b.weight))
            .map(|(index, _)| index)
            .unwrap_or(0);
        warn!(
            "all {} source slots in use, evicting one at weight {}",
            SLOTS, self.live[victim].weight
        );
        self.live.remove(victim);
    }
}
