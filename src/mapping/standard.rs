//! Built-in maps for devices that self-report a well-known layout
//!
//! Currently a single entry: `"standard"`, the W3C canonical gamepad layout.
//! Maps are built through the regular encoder on first use and cached, so
//! they go through the same axis-decoupling as user calibrated maps.

use std::sync::OnceLock;

use super::button_map::{encode_button_map, ButtonMap};
use super::origin::{Destination, Origin};

/// Layout tag reported by devices that follow the W3C canonical layout
pub const STANDARD_LAYOUT: &str = "standard";

/// Bindings of the W3C canonical gamepad layout
fn standard_bindings() -> Vec<(Destination, Origin)> {
    vec![
        (Destination::A, Origin::button(0)),
        (Destination::B, Origin::button(1)),
        (Destination::X, Origin::button(2)),
        (Destination::Y, Origin::button(3)),
        (Destination::LeftShoulder, Origin::button(4)),
        (Destination::RightShoulder, Origin::button(5)),
        (Destination::LeftTrigger, Origin::button(6)),
        (Destination::RightTrigger, Origin::button(7)),
        (Destination::Back, Origin::button(8)),
        (Destination::Start, Origin::button(9)),
        (Destination::LeftStick, Origin::button(10)),
        (Destination::RightStick, Origin::button(11)),
        (Destination::DpadUp, Origin::button(12)),
        (Destination::DpadDown, Origin::button(13)),
        (Destination::DpadLeft, Origin::button(14)),
        (Destination::DpadRight, Origin::button(15)),
        (Destination::Home, Origin::button(16)),
        (Destination::LeftLeft, Origin::axis(0).reversed()),
        (Destination::LeftRight, Origin::axis(0)),
        (Destination::LeftUp, Origin::axis(1).reversed()),
        (Destination::LeftDown, Origin::axis(1)),
        (Destination::RightLeft, Origin::axis(2).reversed()),
        (Destination::RightRight, Origin::axis(2)),
        (Destination::RightUp, Origin::axis(3).reversed()),
        (Destination::RightDown, Origin::axis(3)),
    ]
}

struct StandardEntry {
    encoded: String,
    map: ButtonMap,
}

static STANDARD: OnceLock<StandardEntry> = OnceLock::new();

fn standard_entry() -> &'static StandardEntry {
    STANDARD.get_or_init(|| {
        let encoded = encode_button_map(standard_bindings());
        let map = ButtonMap::parse(&encoded);
        StandardEntry { encoded, map }
    })
}

/// Built-in map for a self-reported layout tag
pub fn layout_map(layout: &str) -> Option<&'static ButtonMap> {
    match layout {
        STANDARD_LAYOUT => Some(&standard_entry().map),
        _ => None,
    }
}

/// Encoded form of a built-in layout map
pub fn layout_encoded(layout: &str) -> Option<&'static str> {
    match layout {
        STANDARD_LAYOUT => Some(standard_entry().encoded.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_resolves() {
        let map = layout_map("standard").unwrap();
        assert_eq!(map.get(Destination::A), Some(Origin::button(0)));
        assert_eq!(map.get(Destination::Home), Some(Origin::button(16)));
        assert_eq!(map.get(Destination::RightTrigger), Some(Origin::button(7)));
    }

    #[test]
    fn test_standard_layout_is_decoupled() {
        let map = layout_map("standard").unwrap();
        assert_eq!(map.get(Destination::LeftLeft), None);
        assert_eq!(map.get(Destination::LeftRight), Some(Origin::axis(0)));
        assert_eq!(map.get(Destination::LeftUp), None);
        assert_eq!(map.get(Destination::LeftDown), Some(Origin::axis(1)));
        assert_eq!(map.get(Destination::RightUp), None);
        assert_eq!(map.get(Destination::RightDown), Some(Origin::axis(3)));
        assert_eq!(map.len(), 21);
    }

    #[test]
    fn test_unknown_layouts() {
        assert!(layout_map("").is_none());
        assert!(layout_map("Standard").is_none());
        assert!(layout_encoded("xr-standard").is_none());
    }

    #[test]
    fn test_encoded_matches_parsed() {
        let encoded = layout_encoded("standard").unwrap();
        assert_eq!(&ButtonMap::parse(encoded), layout_map("standard").unwrap());
    }
}
