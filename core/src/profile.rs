//! Pet identity: name, species, and whether creation has happened.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PET_NAME: &str = "Fluffy";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[default]
    Dog,
    Cat,
    Rabbit,
    Other,
}

impl Species {
    pub const ALL: [Species; 4] = [Species::Dog, Species::Cat, Species::Rabbit, Species::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog    => "dog",
            Self::Cat    => "cat",
            Self::Rabbit => "rabbit",
            Self::Other  => "other",
        }
    }

    /// Parse a species tag. Case-insensitive; unknown tags yield None.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(tag.trim()))
    }

    /// Body colour handed to the renderer (0xRRGGBB).
    pub fn display_color(&self) -> u32 {
        match self {
            Self::Dog    => 0xffb86b,
            Self::Cat    => 0xc790ff,
            Self::Rabbit => 0x9be7ff,
            Self::Other  => 0x9aff9a,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetProfile {
    pub name:    String,
    pub species: Species,
    pub created: bool,
}

impl Default for PetProfile {
    fn default() -> Self {
        Self {
            name:    DEFAULT_PET_NAME.to_string(),
            species: Species::default(),
            created: false,
        }
    }
}

impl PetProfile {
    /// Blank names fall back to the default name.
    pub fn normalize_name(name: &str) -> String {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            DEFAULT_PET_NAME.to_string()
        } else {
            trimmed.to_string()
        }
    }
}
