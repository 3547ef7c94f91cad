//! Raw device reports as delivered by the acquisition layer
//!
//! These are decoded snapshots of whatever the host exposes (browser Gamepad
//! API, gilrs, SDL...). Nothing here talks to hardware.

use serde::{Deserialize, Serialize};

/// One raw button: digital pressed flag plus analog value (nominally 0..1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct RawButton {
    pub pressed: bool,
    #[serde(default)]
    pub value: f32,
}

impl RawButton {
    pub fn new(pressed: bool, value: f32) -> Self {
        Self { pressed, value }
    }
}

/// Raw state of one device slot
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawDeviceState {
    /// Axis values, nominally -1..1
    #[serde(default)]
    pub axes: Vec<f32>,
    #[serde(default)]
    pub buttons: Vec<RawButton>,
    pub connected: bool,
    /// Host timestamp of the last update; zero means never updated
    pub timestamp: f64,
    /// Free-text identifier as self-reported by the device
    pub id: String,
    /// Self-reported layout tag, empty when the device reports none
    #[serde(default)]
    pub mapping: String,
    /// Stable per-session slot index
    pub index: usize,
}

impl RawDeviceState {
    /// Whether this report describes a live device
    ///
    /// Some platforms report phantom slots that claim to be connected but were
    /// never updated, so a zero timestamp also disqualifies.
    pub fn is_live(&self) -> bool {
        self.connected && self.timestamp > 0.0
    }

    /// Axis value, or 0 when the index is out of range
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Button state, or a released zero button when the index is out of range
    pub fn button(&self, index: usize) -> RawButton {
        self.buttons.get(index).copied().unwrap_or_default()
    }
}

/// Slots of one poll; `None` marks an empty slot
pub type Snapshot = [Option<RawDeviceState>];

#[cfg(test)]
mod tests {
    use super::*;

    fn live_device() -> RawDeviceState {
        RawDeviceState {
            axes: vec![0.25, -0.5],
            buttons: vec![RawButton::new(true, 1.0)],
            connected: true,
            timestamp: 16.6,
            id: "pad".to_string(),
            mapping: String::new(),
            index: 0,
        }
    }

    #[test]
    fn test_liveness() {
        assert!(live_device().is_live());

        let mut phantom = live_device();
        phantom.timestamp = 0.0;
        assert!(!phantom.is_live());

        let mut disconnected = live_device();
        disconnected.connected = false;
        assert!(!disconnected.is_live());
    }

    #[test]
    fn test_out_of_range_reads_are_neutral() {
        let device = live_device();
        assert_eq!(device.axis(1), -0.5);
        assert_eq!(device.axis(7), 0.0);
        assert_eq!(device.button(0), RawButton::new(true, 1.0));
        assert_eq!(device.button(3), RawButton::default());
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"[
            null,
            {
                "axes": [0.0, 0.9],
                "buttons": [{"pressed": true, "value": 1.0}, {"pressed": false}],
                "connected": true,
                "timestamp": 1234.5,
                "id": "Wireless Controller",
                "mapping": "standard",
                "index": 1
            }
        ]"#;

        let snapshot: Vec<Option<RawDeviceState>> = serde_json::from_str(json).unwrap();
        assert!(snapshot[0].is_none());

        let device = snapshot[1].as_ref().unwrap();
        assert_eq!(device.axis(1), 0.9);
        assert_eq!(device.button(1), RawButton::new(false, 0.0));
        assert_eq!(device.mapping, "standard");
        assert!(device.is_live());
    }
}
