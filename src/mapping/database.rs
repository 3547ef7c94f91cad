//! Device mapping database
//!
//! Maps a self-reported device identifier to that device's button map. The
//! persisted form is one line per device:
//!
//! ```text
//! 054c-09cc-Wireless Controller,,,a:b1,b:b2,x:b0,y:b3
//! ```
//!
//! Decoding never fails: lines that do not split into exactly an identifier and
//! a map are dropped and counted in [`DecodeReport`].
//!
//! A [`Database`] is an immutable value. Updates return a new database and
//! leave every earlier value untouched; unchanged entries are shared.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use super::button_map::{encode_button_map, ButtonMap};
use super::origin::{Destination, Origin};

/// Divider between the device identifier and the encoded map on one line
pub const LINE_DIVIDER: &str = ",,,";

/// One stored device mapping: the text as persisted plus its parsed table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    encoded: String,
    map: ButtonMap,
}

impl MapEntry {
    fn new(encoded: String) -> Self {
        let (map, dropped) = ButtonMap::parse_with_report(&encoded);
        if dropped > 0 {
            debug!("Map \"{}\" has {} unparseable entries", encoded, dropped);
        }
        Self { encoded, map }
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    pub fn map(&self) -> &ButtonMap {
        &self.map
    }
}

/// Result of decoding persisted database text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub database: Database,
    /// Non-empty lines that were dropped as malformed
    pub dropped_lines: usize,
}

/// Immutable device-id → button map table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    entries: Arc<BTreeMap<String, Arc<MapEntry>>>,
}

impl Database {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode persisted text, dropping malformed lines
    ///
    /// # Example
    /// ```
    /// use padmap::mapping::Database;
    ///
    /// let report = Database::decode("DEV1,,,a:b0\nmalformed\nDEV2,,,b:b1\n");
    /// assert_eq!(report.database.len(), 2);
    /// assert_eq!(report.dropped_lines, 1);
    /// ```
    pub fn decode(text: &str) -> DecodeReport {
        let mut entries = BTreeMap::new();
        let mut dropped_lines = 0;

        for (line_no, line) in text.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(LINE_DIVIDER).collect();
            match fields.as_slice() {
                [id, encoded] => {
                    entries.insert(id.to_string(), Arc::new(MapEntry::new(encoded.to_string())));
                }
                _ => {
                    debug!(
                        "Dropping database line {}: expected 2 fields, found {}",
                        line_no + 1,
                        fields.len()
                    );
                    dropped_lines += 1;
                }
            }
        }

        info!(
            "Loaded {} device mappings ({} lines dropped)",
            entries.len(),
            dropped_lines
        );

        DecodeReport {
            database: Database {
                entries: Arc::new(entries),
            },
            dropped_lines,
        }
    }

    /// Render the database as sorted lines joined with `\n`
    pub fn encode(&self) -> String {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|(id, entry)| format!("{}{}{}", id, LINE_DIVIDER, entry.encoded))
            .collect();
        lines.sort();

        lines.join("\n")
    }

    /// New database with every map rewritten in canonical form
    ///
    /// Each stored map is re-encoded from its parsed table: entries are sorted,
    /// unparseable entries are gone and axis-decoupling is applied. Hand-edited
    /// text is otherwise kept byte for byte by [`Database::encode`].
    pub fn canonical(&self) -> Database {
        let mut rewritten = 0;
        let entries: BTreeMap<String, Arc<MapEntry>> = self
            .entries
            .iter()
            .map(|(id, entry)| {
                let encoded = entry.map.encode();
                if encoded == entry.encoded {
                    (id.clone(), Arc::clone(entry))
                } else {
                    debug!(
                        "Canonicalized map for \"{}\": \"{}\" -> \"{}\"",
                        id, entry.encoded, encoded
                    );
                    rewritten += 1;
                    (id.clone(), Arc::new(MapEntry::new(encoded)))
                }
            })
            .collect();

        info!("Canonicalized {} of {} device mappings", rewritten, entries.len());
        Database {
            entries: Arc::new(entries),
        }
    }

    /// New database with `device_id` bound to the map built from `bindings`
    ///
    /// Any existing map for the device is replaced, never merged.
    pub fn with_mapping<I>(&self, device_id: &str, bindings: I) -> Database
    where
        I: IntoIterator<Item = (Destination, Origin)>,
    {
        self.with_encoded(device_id, encode_button_map(bindings))
    }

    /// New database with `device_id` bound to an already encoded map
    pub fn with_encoded(&self, device_id: &str, encoded: impl Into<String>) -> Database {
        let mut entries = (*self.entries).clone();
        let replaced = entries
            .insert(device_id.to_string(), Arc::new(MapEntry::new(encoded.into())))
            .is_some();

        debug!(
            "{} mapping for \"{}\"",
            if replaced { "Replaced" } else { "Added" },
            device_id
        );

        Database {
            entries: Arc::new(entries),
        }
    }

    /// New database without `device_id`
    pub fn without(&self, device_id: &str) -> Database {
        if !self.entries.contains_key(device_id) {
            return self.clone();
        }

        let mut entries = (*self.entries).clone();
        entries.remove(device_id);
        Database {
            entries: Arc::new(entries),
        }
    }

    /// Stored entry for a device
    pub fn entry(&self, device_id: &str) -> Option<&MapEntry> {
        self.entries.get(device_id).map(|e| e.as_ref())
    }

    /// Parsed map for a device
    pub fn get(&self, device_id: &str) -> Option<&ButtonMap> {
        self.entries.get(device_id).map(|e| e.map())
    }

    /// Map text for a device, as stored
    pub fn get_encoded(&self, device_id: &str) -> Option<&str> {
        self.entries.get(device_id).map(|e| e.encoded())
    }

    pub fn contains(&self, device_id: &str) -> bool {
        self.entries.contains_key(device_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Device identifiers in sorted order
    pub fn device_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    /// All entries in device-id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MapEntry)> {
        self.entries.iter().map(|(id, e)| (id.as_str(), e.as_ref()))
    }
}
