//! Outfit entity and DTOs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::taxonomy::{Occasion, Season};
use crate::types::{RecordId, Timestamp};

/// A named set of clothing item references.
///
/// `items` holds bare ids, not owned copies: deleting an item never
/// cascades into the outfits that list it, and consumers must tolerate
/// dangling references.
///
/// Two field pairs exist for backward compatibility and are kept in sync
/// on every read and write: `season`/`seasons` are always equal, and
/// `occasions` always contains `occasion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: RecordId,
    pub name: String,
    pub items: Vec<RecordId>,
    pub season: Vec<Season>,
    /// Legacy alias of `season`.
    pub seasons: Vec<Season>,
    /// Primary occasion.
    pub occasion: Occasion,
    /// Full occasion set; contains `occasion`.
    pub occasions: Vec<Occasion>,
    pub favorite: bool,
    pub times_worn: u32,
    pub last_worn: Option<Timestamp>,
    pub date_added: Timestamp,
    /// Descriptive styling tags, no invariant beyond present-or-absent.
    pub personality_tags: Vec<String>,
    pub color_scheme: Option<String>,
    pub colors: Vec<String>,
}

impl Outfit {
    /// Re-establish both duality pairs, preferring whichever side is
    /// populated.
    pub fn normalize(mut self) -> Self {
        if self.season.is_empty() && !self.seasons.is_empty() {
            self.season = self.seasons.clone();
        }
        self.seasons = self.season.clone();
        if !self.occasions.contains(&self.occasion) {
            self.occasions.insert(0, self.occasion.clone());
        }
        self
    }
}

/// DTO for creating an outfit. Fields left `None` receive the store's
/// defaults (season `[all]`, occasions `[casual]`, counters 0).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOutfit {
    pub name: String,
    pub items: Vec<RecordId>,
    pub season: Option<Vec<Season>>,
    pub occasion: Option<Occasion>,
    pub occasions: Option<Vec<Occasion>>,
    pub favorite: Option<bool>,
    pub personality_tags: Option<Vec<String>>,
    pub color_scheme: Option<String>,
    pub colors: Option<Vec<String>>,
}

impl CreateOutfit {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Outfit name must not be empty".into()));
        }
        Ok(())
    }
}

/// DTO for a partial outfit update. Only `Some` fields are touched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOutfit {
    pub name: Option<String>,
    pub items: Option<Vec<RecordId>>,
    pub season: Option<Vec<Season>>,
    pub occasion: Option<Occasion>,
    pub occasions: Option<Vec<Occasion>>,
    pub favorite: Option<bool>,
    pub times_worn: Option<u32>,
    pub last_worn: Option<Timestamp>,
    pub personality_tags: Option<Vec<String>>,
    pub color_scheme: Option<String>,
    pub colors: Option<Vec<String>>,
}

impl UpdateOutfit {
    /// Merge this patch into `outfit`, maintaining both duality pairs.
    /// Pure merge: idempotent under repeated application.
    pub fn apply_to(&self, outfit: &mut Outfit) {
        if let Some(name) = &self.name {
            outfit.name = name.clone();
        }
        if let Some(items) = &self.items {
            outfit.items = items.clone();
        }
        if let Some(season) = &self.season {
            outfit.season = season.clone();
            outfit.seasons = season.clone();
        }
        if let Some(occasion) = &self.occasion {
            outfit.occasion = occasion.clone();
            if !outfit.occasions.contains(occasion) {
                outfit.occasions.insert(0, occasion.clone());
            }
        }
        if let Some(occasions) = &self.occasions {
            outfit.occasions = occasions.clone();
            if !outfit.occasions.contains(&outfit.occasion) {
                outfit.occasions.insert(0, outfit.occasion.clone());
            }
        }
        if let Some(favorite) = self.favorite {
            outfit.favorite = favorite;
        }
        if let Some(times_worn) = self.times_worn {
            outfit.times_worn = times_worn;
        }
        if let Some(last_worn) = self.last_worn {
            outfit.last_worn = Some(last_worn);
        }
        if let Some(tags) = &self.personality_tags {
            outfit.personality_tags = tags.clone();
        }
        if let Some(scheme) = &self.color_scheme {
            outfit.color_scheme = Some(scheme.clone());
        }
        if let Some(colors) = &self.colors {
            outfit.colors = colors.clone();
        }
    }
}
