//! Button map vocabulary, text codecs and the device database

pub mod button_map;
pub mod database;
pub mod error;
pub mod origin;
pub mod standard;

pub use button_map::{encode_button_map, lookup, ButtonMap};
pub use database::{Database, DecodeReport, MapEntry, LINE_DIVIDER};
pub use error::ParseError;
pub use origin::{Destination, Origin, OriginKind};
pub use standard::STANDARD_LAYOUT;
