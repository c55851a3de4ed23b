//! Configuration errors
//!
//! Everything here is raised at construction or selection time. Rendering
//! itself never fails.

/// Errors reported to whoever configures or drives the lights
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A constant color tuple had neither 3 (HSV) nor 4 (RGBW) components
    #[error("unable to create a routine from a {0}-component tuple")]
    InvalidArity(usize),
    /// A numeric knob was NaN or infinite
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    /// The intent channel has no room left
    #[error("intent queue is full")]
    QueueFull,
    /// A routine cycler was given nothing to cycle through
    #[error("routine list is empty")]
    EmptyRoutineList,
}

/// Reject NaN and infinities for the named knob
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<f32, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFinite(name))
    }
}
