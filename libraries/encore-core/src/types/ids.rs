/// ID types for Encore entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog track identifier
///
/// Numeric, as handed out by the catalog API. Two tracks are the same track
/// exactly when their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(u64);

impl TrackId {
    /// Create a new track ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TrackId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&TrackId::new(42)).unwrap();
        assert_eq!(json, "42");

        let back: TrackId = serde_json::from_str("42").unwrap();
        assert_eq!(back, TrackId::new(42));
    }

    #[test]
    fn display_matches_inner_value() {
        assert_eq!(TrackId::from(7).to_string(), "7");
    }
}
