/// Real-valued HSV triple
///
/// Hue is a fraction of the color wheel and wraps, so `1.25` is the same hue
/// as `0.25`. Saturation and value are nominally in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub hue: f32,
    pub sat: f32,
    pub val: f32,
}

impl Hsv {
    pub const fn new(hue: f32, sat: f32, val: f32) -> Self {
        Self { hue, sat, val }
    }
}

impl From<(f32, f32, f32)> for Hsv {
    fn from((hue, sat, val): (f32, f32, f32)) -> Self {
        Self::new(hue, sat, val)
    }
}

/// Standard six-sector HSV to RGB conversion
///
/// Returns `(r, g, b)` in the range of `val`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv2rgb(hsv: Hsv) -> (f32, f32, f32) {
    let Hsv { hue, sat, val } = hsv;
    if sat == 0.0 {
        return (val, val, val);
    }

    let hue = hue - libm::floorf(hue);
    let sector_pos = hue * 6.0;
    let sector = libm::floorf(sector_pos);
    let f = sector_pos - sector;

    let p = val * (1.0 - sat);
    let q = val * (1.0 - sat * f);
    let t = val * (1.0 - sat * (1.0 - f));

    // Rounding can land exactly on 6.0 for hues just below a whole turn
    match (sector as u32) % 6 {
        0 => (val, t, p),
        1 => (q, val, p),
        2 => (p, val, t),
        3 => (p, q, val),
        4 => (t, p, val),
        _ => (val, p, q),
    }
}
