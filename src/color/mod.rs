mod hsv;
mod model;
mod rgbw;

pub use hsv::{Hsv, hsv2rgb};
pub use model::{ColorModel, ColorModelConfig};
pub use rgbw::Rgbw;

/// 8-bit RGBW value as consumed by `smart-leds` drivers
pub type Rgbw8 = smart_leds::RGBW<u8>;
