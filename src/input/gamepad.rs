//! Named-control access to classified devices
//!
//! A [`Gamepad`] pairs a device's raw state with its resolved button map and
//! answers queries like "is A pressed" or "left stick X". An
//! [`UnknownGamepad`] has no map and only supports origin estimation.
//!
//! Both borrow the snapshot and database they came from and live for one poll.
//!
//! Reading rules:
//! - Unmapped control: `false` / `0.0`.
//! - Axis origin: the axis value, negated when reversed. Boolean queries
//!   compare it against the press threshold.
//! - Button origin: the pressed flag for boolean queries, the analog value for
//!   analog queries. The other signal is not consulted, even when the two
//!   disagree.

use crate::input::device::RawDeviceState;
use crate::input::estimate::{estimate_origin, Detection};
use crate::mapping::{ButtonMap, Destination, Origin, OriginKind};

/// Axis value above which an axis-bound control reads as pressed
pub const DEFAULT_PRESS_THRESHOLD: f32 = 0.1;

/// Minimum confidence for the origin estimator to report a detection
pub const DEFAULT_DETECTION_THRESHOLD: f32 = 0.5;

/// Tunable thresholds used by the accessor layer and the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub press: f32,
    pub detection: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            press: DEFAULT_PRESS_THRESHOLD,
            detection: DEFAULT_DETECTION_THRESHOLD,
        }
    }
}

/// Where a device's map was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSource {
    /// Stored in the database under the device identifier
    Database,
    /// Built-in map for the device's self-reported layout
    Layout,
    /// Caller-supplied map not stored anywhere, e.g. a calibration in progress
    Preview,
}

/// A button map resolved for one device
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMap<'a> {
    pub encoded: &'a str,
    pub map: &'a ButtonMap,
    pub source: MapSource,
}

/// Resolved reading of one control, used for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlReading {
    pub destination: Destination,
    pub origin: Option<Origin>,
    pub pressed: bool,
    pub value: f32,
}

/// A live device with a resolved button map
#[derive(Debug, Clone, Copy)]
pub struct Gamepad<'a> {
    state: &'a RawDeviceState,
    resolved: ResolvedMap<'a>,
    thresholds: Thresholds,
}

impl<'a> Gamepad<'a> {
    pub fn new(state: &'a RawDeviceState, resolved: ResolvedMap<'a>, thresholds: Thresholds) -> Self {
        Self {
            state,
            resolved,
            thresholds,
        }
    }

    pub fn id(&self) -> &'a str {
        &self.state.id
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn state(&self) -> &'a RawDeviceState {
        self.state
    }

    pub fn map(&self) -> &'a ButtonMap {
        self.resolved.map
    }

    /// Map text the device was resolved to
    pub fn encoded_map(&self) -> &'a str {
        self.resolved.encoded
    }

    pub fn map_source(&self) -> MapSource {
        self.resolved.source
    }

    /// Origin bound to a control on this device
    pub fn origin(&self, destination: Destination) -> Option<Origin> {
        self.resolved.map.get(destination)
    }

    fn axis_value(&self, origin: Origin) -> f32 {
        let value = self.state.axis(origin.index);
        if origin.reversed {
            -value
        } else {
            value
        }
    }

    /// Whether a control currently reads as pressed
    pub fn pressed(&self, destination: Destination) -> bool {
        match self.origin(destination) {
            None => false,
            Some(origin) => match origin.kind {
                OriginKind::Axis => self.axis_value(origin) > self.thresholds.press,
                OriginKind::Button => self.state.button(origin.index).pressed,
            },
        }
    }

    /// Analog value of a control (axis value or button pressure)
    pub fn value(&self, destination: Destination) -> f32 {
        match self.origin(destination) {
            None => 0.0,
            Some(origin) => match origin.kind {
                OriginKind::Axis => self.axis_value(origin),
                OriginKind::Button => self.state.button(origin.index).value,
            },
        }
    }

    /// Combine two half-axis controls into one value in [-1, 1]
    pub fn axis_pair(&self, negative: Destination, positive: Destination) -> f32 {
        (self.value(positive) - self.value(negative)).clamp(-1.0, 1.0)
    }

    /// Left stick horizontal, right positive
    pub fn left_x(&self) -> f32 {
        self.axis_pair(Destination::LeftLeft, Destination::LeftRight)
    }

    /// Left stick vertical, up positive like [`Gamepad::dpad_y`]
    ///
    /// Raw W3C axes report up as negative; the map's half-axis bindings
    /// absorb that, so a pushed-up stick reads positive here.
    pub fn left_y(&self) -> f32 {
        self.axis_pair(Destination::LeftDown, Destination::LeftUp)
    }

    /// Right stick horizontal, right positive
    pub fn right_x(&self) -> f32 {
        self.axis_pair(Destination::RightLeft, Destination::RightRight)
    }

    /// Right stick vertical, up positive
    pub fn right_y(&self) -> f32 {
        self.axis_pair(Destination::RightDown, Destination::RightUp)
    }

    pub fn left_trigger(&self) -> f32 {
        self.value(Destination::LeftTrigger)
    }

    pub fn right_trigger(&self) -> f32 {
        self.value(Destination::RightTrigger)
    }

    pub fn a(&self) -> bool {
        self.pressed(Destination::A)
    }

    pub fn b(&self) -> bool {
        self.pressed(Destination::B)
    }

    pub fn x(&self) -> bool {
        self.pressed(Destination::X)
    }

    pub fn y(&self) -> bool {
        self.pressed(Destination::Y)
    }

    pub fn start(&self) -> bool {
        self.pressed(Destination::Start)
    }

    pub fn back(&self) -> bool {
        self.pressed(Destination::Back)
    }

    pub fn home(&self) -> bool {
        self.pressed(Destination::Home)
    }

    pub fn left_stick(&self) -> bool {
        self.pressed(Destination::LeftStick)
    }

    pub fn right_stick(&self) -> bool {
        self.pressed(Destination::RightStick)
    }

    pub fn left_shoulder(&self) -> bool {
        self.pressed(Destination::LeftShoulder)
    }

    pub fn right_shoulder(&self) -> bool {
        self.pressed(Destination::RightShoulder)
    }

    pub fn dpad_up(&self) -> bool {
        self.pressed(Destination::DpadUp)
    }

    pub fn dpad_down(&self) -> bool {
        self.pressed(Destination::DpadDown)
    }

    pub fn dpad_left(&self) -> bool {
        self.pressed(Destination::DpadLeft)
    }

    pub fn dpad_right(&self) -> bool {
        self.pressed(Destination::DpadRight)
    }

    /// D-pad horizontal as -1 (left), 0 or 1 (right)
    pub fn dpad_x(&self) -> i8 {
        i8::from(self.dpad_right()) - i8::from(self.dpad_left())
    }

    /// D-pad vertical as -1 (down), 0 or 1 (up)
    pub fn dpad_y(&self) -> i8 {
        i8::from(self.dpad_up()) - i8::from(self.dpad_down())
    }

    /// Readings for every destination, in declaration order
    pub fn readings(&self) -> Vec<ControlReading> {
        Destination::ALL
            .iter()
            .map(|&destination| ControlReading {
                destination,
                origin: self.origin(destination),
                pressed: self.pressed(destination),
                value: self.value(destination),
            })
            .collect()
    }
}

/// A live device for which no button map could be resolved
#[derive(Debug, Clone, Copy)]
pub struct UnknownGamepad<'a> {
    state: &'a RawDeviceState,
    thresholds: Thresholds,
}

impl<'a> UnknownGamepad<'a> {
    pub fn new(state: &'a RawDeviceState, thresholds: Thresholds) -> Self {
        Self { state, thresholds }
    }

    pub fn id(&self) -> &'a str {
        &self.state.id
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn state(&self) -> &'a RawDeviceState {
        self.state
    }

    /// Guess which input the user is actuating on this device
    pub fn estimate_origin(&self) -> Option<Detection> {
        estimate_origin(self.state, self.thresholds.detection)
    }

    /// Treat this device as known with the given map, e.g. to preview a
    /// calibration before it is stored
    pub fn with_map(&self, encoded: &'a str, map: &'a ButtonMap) -> Gamepad<'a> {
        Gamepad::new(
            self.state,
            ResolvedMap {
                encoded,
                map,
                source: MapSource::Preview,
            },
            self.thresholds,
        )
    }
}
