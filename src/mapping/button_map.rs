//! Button map codec
//!
//! A button map is the full Destination → Origin relation for one device. At
//! rest it is a compact comma separated string:
//!
//! ```text
//! a:b0,b:b1,leftright:a0,leftup:-a1
//! ```
//!
//! Entries are sorted by their rendered text so the same logical map always
//! encodes to the same bytes. [`ButtonMap`] is the parsed form, built once per
//! database entry so queries never rescan text.

use std::collections::BTreeMap;

use tracing::debug;

use super::error::ParseError;
use super::origin::{Destination, Origin};

/// Separator between entries of one map
pub const ENTRY_SEPARATOR: char = ',';

/// Separator between destination and origin inside an entry
pub const PAIR_SEPARATOR: char = ':';

/// Opposite half-axis pairs checked by the axis-decoupling correction.
///
/// When both members are bound to the same physical axis the first member is
/// dropped, so a paired-axis read does not count that axis twice.
const DECOUPLED_PAIRS: [(Destination, Destination); 4] = [
    (Destination::LeftLeft, Destination::LeftRight),
    (Destination::LeftUp, Destination::LeftDown),
    (Destination::RightLeft, Destination::RightRight),
    (Destination::RightUp, Destination::RightDown),
];

/// Encode recorded bindings into a canonical map string
///
/// Later bindings for the same destination replace earlier ones. The
/// axis-decoupling correction is applied before rendering.
///
/// # Example
/// ```
/// use padmap::mapping::{encode_button_map, Destination, Origin};
///
/// let encoded = encode_button_map([
///     (Destination::B, Origin::button(1)),
///     (Destination::A, Origin::button(0)),
///     (Destination::LeftUp, Origin::axis(1).reversed()),
///     (Destination::LeftDown, Origin::axis(1)),
/// ]);
/// assert_eq!(encoded, "a:b0,b:b1,leftdown:a1");
/// ```
pub fn encode_button_map<I>(bindings: I) -> String
where
    I: IntoIterator<Item = (Destination, Origin)>,
{
    let resolved = resolve_bindings(bindings);

    let mut entries: Vec<String> = resolved
        .iter()
        .map(|(dest, origin)| render_entry(*dest, *origin))
        .collect();
    entries.sort();

    entries.join(",")
}

/// Find the origin bound to `destination` in an encoded map string
///
/// Returns `None` when the control is not mapped on this device; callers treat
/// that as a neutral reading, never as a fault. Unparseable segments are
/// skipped.
pub fn lookup(encoded: &str, destination: Destination) -> Option<Origin> {
    encoded.split(ENTRY_SEPARATOR).find_map(|segment| {
        segment
            .strip_prefix(destination.as_str())
            .and_then(|rest| rest.strip_prefix(PAIR_SEPARATOR))
            .and_then(|origin| origin.parse::<Origin>().ok())
    })
}

/// Group bindings (last write wins) and apply the axis-decoupling correction
fn resolve_bindings<I>(bindings: I) -> BTreeMap<Destination, Origin>
where
    I: IntoIterator<Item = (Destination, Origin)>,
{
    let mut resolved: BTreeMap<Destination, Origin> = bindings.into_iter().collect();
    decouple_axes(&mut resolved);
    resolved
}

fn decouple_axes(resolved: &mut BTreeMap<Destination, Origin>) {
    for (first, second) in DECOUPLED_PAIRS {
        let same_axis = match (resolved.get(&first), resolved.get(&second)) {
            (Some(a), Some(b)) => a.is_axis() && b.is_axis() && a.index == b.index,
            _ => false,
        };

        if same_axis {
            debug!("Decoupling {} from {}: both bound to the same axis", first, second);
            resolved.remove(&first);
        }
    }
}

fn render_entry(destination: Destination, origin: Origin) -> String {
    format!("{}{}{}", destination, PAIR_SEPARATOR, origin)
}

/// Parse one `destination:origin` entry
pub fn parse_entry(entry: &str) -> Result<(Destination, Origin), ParseError> {
    let (dest, origin) = entry
        .split_once(PAIR_SEPARATOR)
        .ok_or_else(|| ParseError::MissingSeparator(entry.to_string()))?;

    Ok((dest.parse()?, origin.parse()?))
}

/// Parsed Destination → Origin table for one device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonMap {
    slots: [Option<Origin>; Destination::COUNT],
}

impl ButtonMap {
    /// Build a map from recorded bindings, with the same semantics as
    /// [`encode_button_map`]
    pub fn from_bindings<I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (Destination, Origin)>,
    {
        let mut map = ButtonMap::default();
        for (dest, origin) in resolve_bindings(bindings) {
            map.slots[dest.ordinal()] = Some(origin);
        }
        map
    }

    /// Leniently parse an encoded map, dropping entries that do not parse
    pub fn parse(encoded: &str) -> Self {
        Self::parse_with_report(encoded).0
    }

    /// Leniently parse an encoded map and report how many entries were dropped
    ///
    /// When a destination appears more than once the first entry wins, which
    /// matches what [`lookup`] returns for the same string.
    pub fn parse_with_report(encoded: &str) -> (Self, usize) {
        let mut map = ButtonMap::default();
        let mut dropped = 0;

        for segment in encoded.split(ENTRY_SEPARATOR).filter(|s| !s.is_empty()) {
            match parse_entry(segment) {
                Ok((dest, origin)) => {
                    let slot = &mut map.slots[dest.ordinal()];
                    if slot.is_none() {
                        *slot = Some(origin);
                    }
                }
                Err(e) => {
                    debug!("Dropping map entry: {}", e);
                    dropped += 1;
                }
            }
        }

        (map, dropped)
    }

    /// Parse an encoded map, failing on the first malformed entry
    pub fn parse_strict(encoded: &str) -> Result<Self, ParseError> {
        let bindings = encoded
            .split(ENTRY_SEPARATOR)
            .filter(|s| !s.is_empty())
            .map(parse_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let mut map = ButtonMap::default();
        for (dest, origin) in bindings {
            map.slots[dest.ordinal()].get_or_insert(origin);
        }
        Ok(map)
    }

    /// Origin bound to a destination, if any
    pub fn get(&self, destination: Destination) -> Option<Origin> {
        self.slots[destination.ordinal()]
    }

    /// Bound destinations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Destination, Origin)> + '_ {
        Destination::ALL
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(dest, origin)| origin.map(|o| (*dest, o)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Canonical encoded form of this map
    pub fn encode(&self) -> String {
        encode_button_map(self.iter())
    }
}
