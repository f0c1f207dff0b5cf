use serde::{Deserialize, Serialize};

use super::TrickId;

/// A type of trick (e.g. kickflip), not a specific attempt of one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub id: TrickId,
    pub name: String,
}

/// Flat-ground tricks loaded into a fresh catalogue, in id order starting at 1.
pub const STANDARD_TRICKS: &[&str] = &[
    "Ollie",
    "Nollie",
    "Pop Shove-it",
    "FS Pop Shove-it",
    "FS 180",
    "BS 180",
    "Kickflip",
    "Heelflip",
    "Varial Kickflip",
    "Varial Heelflip",
    "Hardflip",
    "Inward Heelflip",
    "360 Flip",
    "Laser Flip",
    "FS Bigspin",
    "BS Bigspin",
    "Kickflip Bigspin",
    "Heelflip Bigspin",
];

/// Lookup table of trick definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickCatalog {
    tricks: Vec<Trick>,
}

impl TrickCatalog {
    /// Catalogue with [`STANDARD_TRICKS`].
    pub fn standard() -> Self {
        Self {
            tricks: STANDARD_TRICKS
                .iter()
                .zip(1u32..)
                .map(|(name, id)| Trick {
                    id: TrickId(id),
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    /// Add a trick under the next free id, or return the id it already has.
    pub fn insert(&mut self, name: &str) -> TrickId {
        if let Some(trick) = self.by_name(name) {
            return trick.id;
        }
        let id = TrickId(self.tricks.iter().map(|t| t.id.0).max().unwrap_or(0) + 1);
        self.tricks.push(Trick {
            id,
            name: name.to_string(),
        });
        id
    }

    pub fn get(&self, id: TrickId) -> Option<&Trick> {
        self.tricks.iter().find(|t| t.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Trick> {
        self.tricks.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, id: TrickId) -> bool {
        self.get(id).is_some()
    }

    /// Trick name, or `trick #<id>` for ids missing from the catalogue.
    pub fn name_or_fallback(&self, id: TrickId) -> String {
        match self.get(id) {
            Some(trick) => trick.name.clone(),
            None => format!("trick #{id}"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trick> {
        self.tricks.iter()
    }

    pub fn len(&self) -> usize {
        self.tricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tricks.is_empty()
    }
}
