#![no_std]

pub mod color;
pub mod error;
pub mod frame_scheduler;
pub mod intent_processor;
pub mod lights;
pub mod output;
pub mod routine;
pub mod source;
pub mod switch;

pub use color::{ColorModel, ColorModelConfig, Hsv, Rgbw, Rgbw8};
pub use error::Error;
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use intent_processor::{
    IntentChannel, IntentEffects, IntentProcessor, IntentReceiver, IntentSender, LightsHandle,
    LightsIntent,
};
pub use lights::{LiveSource, Lights, LightsConfig};
pub use output::{NullOutput, OutputDriver, SmartLedsOutput};
pub use routine::{
    RainbowConfig, RainbowRoutine, Routine, RoutineSlot, SparkleConfig, SparkleRoutine,
};
pub use source::{DEFAULT_PRESETS, Preset, Source};
pub use switch::{ButtonEvent, RoutineCycler};

pub use embassy_time::{Duration, Instant};
