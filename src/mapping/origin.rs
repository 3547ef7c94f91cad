//! Physical input references and logical control names
//!
//! An [`Origin`] points at one raw element of a device report (an axis or a
//! button, by index, optionally read negated). A [`Destination`] names a
//! logical control independent of hardware layout.
//!
//! Both have a compact text form that is part of the persisted map encoding:
//!
//! ```text
//! destination ":" ["-"] ("a" | "b") index
//! leftleft:-a0
//! a:b0
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::ParseError;

/// Kind of raw element an origin refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OriginKind {
    /// Entry in the device's axis array
    Axis,
    /// Entry in the device's button array
    Button,
}

impl OriginKind {
    /// Type character used in the map encoding
    pub fn type_char(self) -> char {
        match self {
            OriginKind::Axis => 'a',
            OriginKind::Button => 'b',
        }
    }

    fn from_type_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(OriginKind::Axis),
            'b' => Some(OriginKind::Button),
            _ => None,
        }
    }
}

/// Reference to one physical input of a raw device report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin {
    pub kind: OriginKind,
    pub index: usize,
    /// Read the underlying value negated
    pub reversed: bool,
}

impl Origin {
    /// Non-reversed axis origin
    pub fn axis(index: usize) -> Self {
        Self {
            kind: OriginKind::Axis,
            index,
            reversed: false,
        }
    }

    /// Non-reversed button origin
    pub fn button(index: usize) -> Self {
        Self {
            kind: OriginKind::Button,
            index,
            reversed: false,
        }
    }

    /// Same origin with the reversed flag set
    pub fn reversed(self) -> Self {
        Self {
            reversed: true,
            ..self
        }
    }

    pub fn is_axis(&self) -> bool {
        self.kind == OriginKind::Axis
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reversed {
            f.write_str("-")?;
        }
        write!(f, "{}{}", self.kind.type_char(), self.index)
    }
}

impl FromStr for Origin {
    type Err = ParseError;

    /// Parse an origin token such as `b3` or `-a1`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (reversed, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut chars = rest.chars();
        let kind = chars
            .next()
            .and_then(OriginKind::from_type_char)
            .ok_or_else(|| ParseError::InvalidOrigin(s.to_string()))?;

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidIndex(s.to_string()));
        }
        let index = digits
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidIndex(s.to_string()))?;

        Ok(Origin {
            kind,
            index,
            reversed,
        })
    }
}

/// Logical control name
///
/// The string form returned by [`Destination::as_str`] is persisted in every
/// stored map and must never change for an existing variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Destination {
    A,
    B,
    X,
    Y,
    Start,
    Back,
    Home,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftLeft,
    LeftRight,
    LeftUp,
    LeftDown,
    RightLeft,
    RightRight,
    RightUp,
    RightDown,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
}

impl Destination {
    /// Number of destinations
    pub const COUNT: usize = 25;

    /// Every destination, in declaration order
    pub const ALL: [Destination; Destination::COUNT] = [
        Destination::A,
        Destination::B,
        Destination::X,
        Destination::Y,
        Destination::Start,
        Destination::Back,
        Destination::Home,
        Destination::DpadUp,
        Destination::DpadDown,
        Destination::DpadLeft,
        Destination::DpadRight,
        Destination::LeftLeft,
        Destination::LeftRight,
        Destination::LeftUp,
        Destination::LeftDown,
        Destination::RightLeft,
        Destination::RightRight,
        Destination::RightUp,
        Destination::RightDown,
        Destination::LeftStick,
        Destination::RightStick,
        Destination::LeftShoulder,
        Destination::RightShoulder,
        Destination::LeftTrigger,
        Destination::RightTrigger,
    ];

    /// Canonical name used in the map encoding
    pub fn as_str(self) -> &'static str {
        match self {
            Destination::A => "a",
            Destination::B => "b",
            Destination::X => "x",
            Destination::Y => "y",
            Destination::Start => "start",
            Destination::Back => "back",
            Destination::Home => "home",
            Destination::DpadUp => "dpadup",
            Destination::DpadDown => "dpaddown",
            Destination::DpadLeft => "dpadleft",
            Destination::DpadRight => "dpadright",
            Destination::LeftLeft => "leftleft",
            Destination::LeftRight => "leftright",
            Destination::LeftUp => "leftup",
            Destination::LeftDown => "leftdown",
            Destination::RightLeft => "rightleft",
            Destination::RightRight => "rightright",
            Destination::RightUp => "rightup",
            Destination::RightDown => "rightdown",
            Destination::LeftStick => "leftstick",
            Destination::RightStick => "rightstick",
            Destination::LeftShoulder => "leftshoulder",
            Destination::RightShoulder => "rightshoulder",
            Destination::LeftTrigger => "lefttrigger",
            Destination::RightTrigger => "righttrigger",
        }
    }

    /// Position in [`Destination::ALL`], used for table indexing
    pub(crate) fn ordinal(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Destination {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Destination::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseError::UnknownDestination(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_destination_names_unique_and_round_trip() {
        let names: HashSet<&str> = Destination::ALL.iter().map(|d| d.as_str()).collect();
        assert_eq!(names.len(), Destination::ALL.len());

        for dest in Destination::ALL {
            assert_eq!(dest.as_str().parse::<Destination>().unwrap(), dest);
            assert_eq!(dest.as_str(), dest.as_str().to_lowercase());
        }
    }

    #[test]
    fn test_destination_ordinal_matches_all() {
        for (i, dest) in Destination::ALL.iter().enumerate() {
            assert_eq!(dest.ordinal(), i);
        }
    }

    #[test]
    fn test_stable_encoding_names() {
        // Persisted names; changing any of these breaks stored databases
        assert_eq!(Destination::A.as_str(), "a");
        assert_eq!(Destination::LeftLeft.as_str(), "leftleft");
        assert_eq!(Destination::RightDown.as_str(), "rightdown");
        assert_eq!(Destination::LeftShoulder.as_str(), "leftshoulder");
        assert_eq!(Destination::RightTrigger.as_str(), "righttrigger");
    }

    #[test]
    fn test_unknown_destination() {
        assert_eq!(
            "select".parse::<Destination>(),
            Err(ParseError::UnknownDestination("select".to_string()))
        );
        assert!("A".parse::<Destination>().is_err()); // Case sensitive
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::button(0).to_string(), "b0");
        assert_eq!(Origin::axis(12).to_string(), "a12");
        assert_eq!(Origin::axis(1).reversed().to_string(), "-a1");
    }

    #[test]
    fn test_origin_parse() {
        assert_eq!("b3".parse::<Origin>().unwrap(), Origin::button(3));
        assert_eq!("-a1".parse::<Origin>().unwrap(), Origin::axis(1).reversed());
        assert_eq!("a10".parse::<Origin>().unwrap(), Origin::axis(10));
    }

    #[test]
    fn test_origin_parse_rejects_malformed() {
        assert!(matches!("c1".parse::<Origin>(), Err(ParseError::InvalidOrigin(_))));
        assert!(matches!("".parse::<Origin>(), Err(ParseError::InvalidOrigin(_))));
        assert!(matches!("a".parse::<Origin>(), Err(ParseError::InvalidIndex(_))));
        assert!(matches!("a+1".parse::<Origin>(), Err(ParseError::InvalidIndex(_))));
        assert!(matches!("b-1".parse::<Origin>(), Err(ParseError::InvalidIndex(_))));
        assert!(matches!("--a1".parse::<Origin>(), Err(ParseError::InvalidOrigin(_))));
    }

    #[test]
    fn test_origin_equality_is_structural() {
        assert_eq!(Origin::axis(1), Origin::axis(1));
        assert_ne!(Origin::axis(1), Origin::axis(1).reversed());
        assert_ne!(Origin::axis(1), Origin::button(1));
    }
}
