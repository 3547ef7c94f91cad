//! Known/unknown classification of a device snapshot
//!
//! For each live slot a map is resolved by, in order:
//! 1. the device identifier in the [`Database`],
//! 2. the self-reported layout tag in the built-in layout table.
//!
//! Devices that resolve are known; the rest are unknown. Slots that are empty
//! or fail the liveness check appear in neither list.

use tracing::trace;

use crate::input::device::{RawDeviceState, Snapshot};
use crate::input::gamepad::{Gamepad, MapSource, ResolvedMap, Thresholds, UnknownGamepad};
use crate::mapping::{standard, Database};

/// Devices of one snapshot, split by whether a map was found
#[derive(Debug, Clone, Default)]
pub struct Classified<'a> {
    pub known: Vec<Gamepad<'a>>,
    pub unknown: Vec<UnknownGamepad<'a>>,
}

impl<'a> Classified<'a> {
    /// Total number of live devices
    pub fn len(&self) -> usize {
        self.known.len() + self.unknown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.unknown.is_empty()
    }

    /// Known device occupying a slot index
    pub fn known_by_index(&self, index: usize) -> Option<&Gamepad<'a>> {
        self.known.iter().find(|g| g.index() == index)
    }

    /// Unknown device occupying a slot index
    pub fn unknown_by_index(&self, index: usize) -> Option<&UnknownGamepad<'a>> {
        self.unknown.iter().find(|g| g.index() == index)
    }
}

/// Resolve the button map for one device
pub fn resolve_map<'a>(state: &RawDeviceState, database: &'a Database) -> Option<ResolvedMap<'a>> {
    if let Some(entry) = database.entry(&state.id) {
        return Some(ResolvedMap {
            encoded: entry.encoded(),
            map: entry.map(),
            source: MapSource::Database,
        });
    }

    let map = standard::layout_map(&state.mapping)?;
    let encoded = standard::layout_encoded(&state.mapping)?;
    Some(ResolvedMap {
        encoded,
        map,
        source: MapSource::Layout,
    })
}

/// Classify a snapshot with the default thresholds
///
/// # Example
/// ```
/// use padmap::input::{classify, RawButton, RawDeviceState};
/// use padmap::mapping::Database;
///
/// let database = Database::decode("Acme Pad,,,a:b0").database;
/// let snapshot = vec![
///     Some(RawDeviceState {
///         buttons: vec![RawButton::new(true, 1.0)],
///         connected: true,
///         timestamp: 10.0,
///         id: "Acme Pad".to_string(),
///         ..Default::default()
///     }),
///     None,
/// ];
///
/// let classified = classify(&snapshot, &database);
/// assert_eq!(classified.known.len(), 1);
/// assert!(classified.known[0].a());
/// ```
pub fn classify<'a>(snapshot: &'a Snapshot, database: &'a Database) -> Classified<'a> {
    classify_with(snapshot, database, Thresholds::default())
}

/// Classify a snapshot, attaching `thresholds` to every produced gamepad
pub fn classify_with<'a>(
    snapshot: &'a Snapshot,
    database: &'a Database,
    thresholds: Thresholds,
) -> Classified<'a> {
    let mut classified = Classified::default();

    for state in snapshot.iter().flatten() {
        if !state.is_live() {
            trace!("Skipping slot {} (\"{}\"): not live", state.index, state.id);
            continue;
        }

        match resolve_map(state, database) {
            Some(resolved) => {
                trace!(
                    "Slot {} (\"{}\") known via {:?}",
                    state.index,
                    state.id,
                    resolved.source
                );
                classified.known.push(Gamepad::new(state, resolved, thresholds));
            }
            None => {
                trace!("Slot {} (\"{}\") unknown", state.index, state.id);
                classified.unknown.push(UnknownGamepad::new(state, thresholds));
            }
        }
    }

    classified
}
