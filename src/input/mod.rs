//! Raw device snapshots, classification and named-control access

pub mod classify;
pub mod device;
pub mod estimate;
pub mod gamepad;

pub use classify::{classify, classify_with, resolve_map, Classified};
pub use device::{RawButton, RawDeviceState, Snapshot};
pub use estimate::{estimate_origin, Detection};
pub use gamepad::{
    ControlReading, Gamepad, MapSource, ResolvedMap, Thresholds, UnknownGamepad,
    DEFAULT_DETECTION_THRESHOLD, DEFAULT_PRESS_THRESHOLD,
};
