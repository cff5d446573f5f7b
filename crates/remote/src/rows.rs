//! Row shapes as stored by the remote tables.
//!
//! Columns are snake_case and loosely typed: timestamps travel as RFC 3339
//! strings, enums as plain strings, and most columns may be absent on rows
//! written by older clients. Every field that can be missing carries
//! `#[serde(default)]` so a sparse row still deserializes.
//!
//! Patch structs serialize only their `Some` fields, which is what makes
//! partial updates partial on the wire.

use serde::{Deserialize, Serialize};

use lookbook_core::types::{RecordId, UserId};

/// A row of the `clothing_items` table.
///
/// `id` is `None` only on insert payloads; the remote store assigns it
/// and echoes it back in the insert response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItemRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: UserId,
    pub name: String,
    /// Garment category. Named `type` in the table.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub material: String,
    /// Season tag array. Singular column name for historical reasons.
    #[serde(default)]
    pub season: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Legacy image column still present on old rows; never written.
    #[serde(default, skip_serializing)]
    pub image: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub times_worn: u32,
    #[serde(default)]
    pub last_worn: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
}

/// Partial update for a `clothing_items` row. Only `Some` columns are
/// serialized, so unset fields are never overwritten remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClothingItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times_worn: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_worn: Option<String>,
}

impl ClothingItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A row of the `outfits` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfitRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<RecordId>,
    /// Season tags. Old rows stored a bare string here, newer rows an
    /// array; reads tolerate both.
    #[serde(default, deserialize_with = "one_or_many")]
    pub season: Vec<String>,
    /// Primary occasion.
    #[serde(default)]
    pub occasion: Option<String>,
    /// Full occasion set; kept containing `occasion` on every write.
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub times_worn: u32,
    #[serde(default)]
    pub last_worn: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub personality_tags: Vec<String>,
    #[serde(default)]
    pub color_scheme: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// Partial update for an `outfits` row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutfitPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<RecordId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times_worn: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_worn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl OutfitPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Deserialize either a bare string or an array of strings into a `Vec`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}
