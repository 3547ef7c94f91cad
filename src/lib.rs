//! padmap - persistent gamepad button maps
//!
//! Turns unstable per-device raw input reports into a stable named-control
//! view by applying a stored button map keyed by device identifier.
//!
//! - [`mapping`]: destinations, origins, the button-map and database codecs
//! - [`input`]: raw snapshots, known/unknown classification, named-control
//!   access and origin estimation for calibration
//!
//! ```
//! use padmap::input::{classify, RawButton, RawDeviceState};
//! use padmap::mapping::{Database, Destination, Origin};
//!
//! // Calibration recorded that this pad's A button is raw button 2
//! let db = Database::new().with_mapping("Acme Pad", [(Destination::A, Origin::button(2))]);
//! let text = db.encode();
//!
//! // Later, at query time
//! let db = Database::decode(&text).database;
//! let snapshot = vec![Some(RawDeviceState {
//!     buttons: vec![RawButton::default(), RawButton::default(), RawButton::new(true, 1.0)],
//!     connected: true,
//!     timestamp: 1.0,
//!     id: "Acme Pad".to_string(),
//!     ..Default::default()
//! })];
//! let classified = classify(&snapshot, &db);
//! assert!(classified.known[0].a());
//! ```

pub mod config;
pub mod input;
pub mod mapping;
pub mod paths;
pub mod persistence;

pub use config::PadmapConfig;
pub use input::{classify, Classified, Gamepad, RawButton, RawDeviceState, UnknownGamepad};
pub use mapping::{Database, Destination, Origin};
