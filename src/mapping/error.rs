//! Error types for the strict map parsers
//!
//! The lenient decoders used at query time never surface these; they drop the
//! offending entry instead. Strict parsing is for user-facing boundaries such as
//! CLI arguments, where a typo should be reported rather than ignored.

use thiserror::Error;

/// Failure to parse a destination name, an origin token or a map entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Destination name is not one of the known control names
    #[error("Unknown destination: {0:?}")]
    UnknownDestination(String),

    /// Map entry has no `:` between destination and origin
    #[error("Missing ':' in map entry: {0:?}")]
    MissingSeparator(String),

    /// Origin token does not start with `a`, `b`, `-a` or `-b`
    #[error("Invalid origin: {0:?}")]
    InvalidOrigin(String),

    /// Origin index is not a non-negative integer
    #[error("Invalid origin index in {0:?}")]
    InvalidIndex(String),
}
