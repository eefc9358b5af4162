//! Faction definitions and identifiers.

use serde::{Deserialize, Serialize};

/// Unique identifier for factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// The Brotherhood of Nod.
    Nod,
    /// The Global Defense Initiative.
    Gdi,
    /// The Forgotten - mutant camps and outposts only ever seen as targets.
    Forgotten,
}

impl Faction {
    /// All factions in catalog order.
    pub const ALL: [Self; 3] = [Self::Nod, Self::Gdi, Self::Forgotten];

    /// Get the short name for this faction.
    #[must_use]
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::Nod => "nod",
            Self::Gdi => "gdi",
            Self::Forgotten => "forgotten",
        }
    }

    /// Parse a short faction name, case-insensitively.
    #[must_use]
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.short_name().eq_ignore_ascii_case(name))
    }
}
