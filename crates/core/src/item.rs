//! Clothing item entity and DTOs.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::taxonomy::{GarmentKind, Occasion, Season};
use crate::types::{RecordId, Timestamp};

/// A single wardrobe entry.
///
/// `image_url` is the canonical image field; `image` is a legacy alias
/// that older clients still read. The two are kept equal on every read
/// and write path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    /// Assigned by the remote store on creation. Never client-generated.
    pub id: RecordId,
    pub name: String,
    pub kind: GarmentKind,
    pub color: String,
    pub material: String,
    pub seasons: Vec<Season>,
    pub occasions: Vec<Occasion>,
    pub image_url: String,
    /// Legacy alias of `image_url`.
    pub image: String,
    pub favorite: bool,
    pub times_worn: u32,
    pub last_worn: Option<Timestamp>,
    /// Set at creation, immutable thereafter. Defaults to "now" when the
    /// remote row predates the column.
    pub date_added: Timestamp,
}

impl ClothingItem {
    /// Re-establish the `image`/`image_url` duality, preferring whichever
    /// side is non-empty.
    pub fn normalize(mut self) -> Self {
        if self.image_url.is_empty() && !self.image.is_empty() {
            self.image_url = self.image.clone();
        }
        self.image = self.image_url.clone();
        self
    }
}

/// DTO for creating a clothing item. Fields left `None` receive the
/// store's defaults (seasons `[all]`, occasions `[casual]`, counters 0).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClothingItem {
    pub name: String,
    pub kind: GarmentKind,
    pub color: String,
    pub material: String,
    pub seasons: Option<Vec<Season>>,
    pub occasions: Option<Vec<Occasion>>,
    pub image_url: Option<String>,
    pub favorite: Option<bool>,
}

impl CreateClothingItem {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Item name must not be empty".into()));
        }
        Ok(())
    }
}

/// DTO for a partial update. Only `Some` fields are touched; `date_added`
/// is deliberately absent (immutable after creation).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClothingItem {
    pub name: Option<String>,
    pub kind: Option<GarmentKind>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub seasons: Option<Vec<Season>>,
    pub occasions: Option<Vec<Occasion>>,
    pub image_url: Option<String>,
    pub favorite: Option<bool>,
    pub times_worn: Option<u32>,
    pub last_worn: Option<Timestamp>,
}

impl UpdateClothingItem {
    /// Merge this patch into `item`. Pure merge: applying the same patch
    /// twice yields the same result as applying it once.
    pub fn apply_to(&self, item: &mut ClothingItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(kind) = &self.kind {
            item.kind = kind.clone();
        }
        if let Some(color) = &self.color {
            item.color = color.clone();
        }
        if let Some(material) = &self.material {
            item.material = material.clone();
        }
        if let Some(seasons) = &self.seasons {
            item.seasons = seasons.clone();
        }
        if let Some(occasions) = &self.occasions {
            item.occasions = occasions.clone();
        }
        if let Some(image_url) = &self.image_url {
            item.image_url = image_url.clone();
            item.image = image_url.clone();
        }
        if let Some(favorite) = self.favorite {
            item.favorite = favorite;
        }
        if let Some(times_worn) = self.times_worn {
            item.times_worn = times_worn;
        }
        if let Some(last_worn) = self.last_worn {
            item.last_worn = Some(last_worn);
        }
    }
}
