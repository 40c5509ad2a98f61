use std::fmt;

use serde::{Deserialize, Serialize};

/// Geographic aggregation tier a feature belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GeoLevel {
    #[default]
    Tract,      // Census tract
    BlockGroup, // Census block group, tagged "cbg"
    Other(String),
}

impl GeoLevel {
    pub fn as_str(&self) -> &str {
        match self {
            GeoLevel::Tract => "tract",
            GeoLevel::BlockGroup => "cbg",
            GeoLevel::Other(tag) => tag,
        }
    }

    /// Parse a level tag. Matching is exact, unknown tags are kept verbatim.
    pub fn from_tag(tag: &str) -> Self { GeoLevel::from(tag.to_string()) }
}

impl From<String> for GeoLevel {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "tract" => GeoLevel::Tract,
            "cbg" => GeoLevel::BlockGroup,
            _ => GeoLevel::Other(tag),
        }
    }
}

impl From<GeoLevel> for String {
    fn from(level: GeoLevel) -> Self { level.as_str().to_string() }
}

impl fmt::Display for GeoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
