//! Origin estimation for calibration
//!
//! Given one snapshot of an unmapped device, guess which single raw input the
//! user is actuating right now. A calibration flow calls this on successive
//! polls and records the winner against the control it asked for.

use tracing::debug;

use crate::input::device::RawDeviceState;
use crate::mapping::Origin;

/// A detected origin and how strongly it is being actuated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub origin: Origin,
    /// |axis value| for axes, 1 or 0 for buttons
    pub confidence: f32,
}

/// Every input of the device scored as a candidate, axes first then buttons
///
/// Non-finite axis readings are skipped.
pub fn candidates(state: &RawDeviceState) -> impl Iterator<Item = Detection> + '_ {
    let axes = state
        .axes
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(index, &value)| Detection {
            origin: Origin {
                reversed: value < 0.0,
                ..Origin::axis(index)
            },
            confidence: value.abs(),
        });

    let buttons = state
        .buttons
        .iter()
        .enumerate()
        .map(|(index, button)| Detection {
            origin: Origin::button(index),
            confidence: if button.pressed { 1.0 } else { 0.0 },
        });

    axes.chain(buttons)
}

/// Pick the most strongly actuated input, if it reaches `min_confidence`
///
/// Ties go to the earliest candidate in [`candidates`] order: lower axis index
/// first, then any axis before any button, then lower button index.
///
/// # Example
/// ```
/// use padmap::input::{estimate_origin, RawButton, RawDeviceState};
/// use padmap::mapping::Origin;
///
/// let state = RawDeviceState {
///     axes: vec![0.05, 0.9],
///     buttons: vec![RawButton::default(); 4],
///     connected: true,
///     timestamp: 1.0,
///     ..Default::default()
/// };
/// let detection = estimate_origin(&state, 0.5).unwrap();
/// assert_eq!(detection.origin, Origin::axis(1));
/// ```
pub fn estimate_origin(state: &RawDeviceState, min_confidence: f32) -> Option<Detection> {
    let best = candidates(state).fold(None::<Detection>, |best, candidate| match best {
        Some(b) if candidate.confidence <= b.confidence => Some(b),
        _ => Some(candidate),
    })?;

    if best.confidence < min_confidence {
        return None;
    }

    debug!(
        "Detected origin {} on \"{}\" (confidence {:.2})",
        best.origin, state.id, best.confidence
    );
    Some(best)
}
