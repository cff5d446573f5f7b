//! Row ↔ domain mapping.
//!
//! All field-name translation, date parsing, and compatibility-field
//! bookkeeping happens here and nowhere else. Functions are pure so the
//! dual-spelling invariants (`image`/`image_url`, `season`/`seasons`,
//! `occasion`/`occasions`) can be unit-tested field by field.

use chrono::{DateTime, Utc};

use lookbook_core::item::{ClothingItem, CreateClothingItem, UpdateClothingItem};
use lookbook_core::outfit::{CreateOutfit, Outfit, UpdateOutfit};
use lookbook_core::taxonomy::{GarmentKind, Occasion, Season};
use lookbook_core::types::{Timestamp, UserId};

use crate::rows::{ClothingItemPatch, ClothingItemRow, OutfitPatch, OutfitRow};

/// Parse an RFC 3339 timestamp column, treating unparsable values the
/// same as absent ones.
pub fn parse_timestamp(value: Option<&str>) -> Option<Timestamp> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn seasons_from(values: &[String]) -> Vec<Season> {
    values.iter().map(|s| Season::parse(s)).collect()
}

fn seasons_to(values: &[Season]) -> Vec<String> {
    values.iter().map(|s| s.as_str().to_string()).collect()
}

fn occasions_from(values: &[String]) -> Vec<Occasion> {
    values.iter().map(|s| Occasion::parse(s)).collect()
}

fn occasions_to(values: &[Occasion]) -> Vec<String> {
    values.iter().map(|o| o.as_str().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Clothing items
// ---------------------------------------------------------------------------

/// Map a remote row into the domain shape.
///
/// A missing `date_added` defaults to the current time; a missing
/// `image_url` falls back to the legacy `image` column. The result always
/// has both image spellings populated and equal.
pub fn clothing_item_from_row(row: ClothingItemRow) -> ClothingItem {
    let image_url = row
        .image_url
        .or(row.image)
        .unwrap_or_default();
    ClothingItem {
        id: row.id.unwrap_or_default(),
        name: row.name,
        kind: GarmentKind::parse(&row.kind),
        color: row.color,
        material: row.material,
        seasons: seasons_from(&row.season),
        occasions: occasions_from(&row.occasions),
        image: image_url.clone(),
        image_url,
        favorite: row.favorite,
        times_worn: row.times_worn,
        last_worn: parse_timestamp(row.last_worn.as_deref()),
        date_added: parse_timestamp(row.date_added.as_deref()).unwrap_or_else(Utc::now),
    }
}

/// Build an insert payload from a create DTO, filling in the defaults the
/// caller left unset: seasons `[all]`, occasions `[casual]`, counters 0,
/// favorite false, `date_added = now`.
pub fn clothing_row_for_insert(
    user_id: &UserId,
    draft: &CreateClothingItem,
    now: Timestamp,
) -> ClothingItemRow {
    let seasons = draft
        .seasons
        .clone()
        .unwrap_or_else(|| vec![Season::All]);
    let occasions = draft
        .occasions
        .clone()
        .unwrap_or_else(|| vec![Occasion::Casual]);
    ClothingItemRow {
        id: None,
        user_id: user_id.clone(),
        name: draft.name.clone(),
        kind: draft.kind.as_str().to_string(),
        color: draft.color.clone(),
        material: draft.material.clone(),
        season: seasons_to(&seasons),
        occasions: occasions_to(&occasions),
        image_url: draft.image_url.clone(),
        image: None,
        favorite: draft.favorite.unwrap_or(false),
        times_worn: 0,
        last_worn: None,
        date_added: Some(now.to_rfc3339()),
    }
}

/// Translate a partial update into row columns, field by field. Unset
/// fields stay unset and are never written remotely.
pub fn clothing_patch_from_update(update: &UpdateClothingItem) -> ClothingItemPatch {
    ClothingItemPatch {
        name: update.name.clone(),
        kind: update.kind.as_ref().map(|k| k.as_str().to_string()),
        color: update.color.clone(),
        material: update.material.clone(),
        season: update.seasons.as_deref().map(seasons_to),
        occasions: update.occasions.as_deref().map(occasions_to),
        image_url: update.image_url.clone(),
        favorite: update.favorite,
        times_worn: update.times_worn,
        last_worn: update.last_worn.map(|t| t.to_rfc3339()),
    }
}

// ---------------------------------------------------------------------------
// Outfits
// ---------------------------------------------------------------------------

/// Map a remote outfit row into the domain shape.
///
/// The single `season` column populates both domain spellings. The primary
/// `occasion` falls back to the first entry of `occasions`, then to
/// casual; the full set always contains the primary.
pub fn outfit_from_row(row: OutfitRow) -> Outfit {
    let season = seasons_from(&row.season);
    let occasion = row
        .occasion
        .as_deref()
        .map(Occasion::parse)
        .or_else(|| row.occasions.first().map(|s| Occasion::parse(s)))
        .unwrap_or(Occasion::Casual);
    let mut occasions = occasions_from(&row.occasions);
    if !occasions.contains(&occasion) {
        occasions.insert(0, occasion.clone());
    }
    Outfit {
        id: row.id.unwrap_or_default(),
        name: row.name,
        items: row.items,
        seasons: season.clone(),
        season,
        occasion,
        occasions,
        favorite: row.favorite,
        times_worn: row.times_worn,
        last_worn: parse_timestamp(row.last_worn.as_deref()),
        date_added: parse_timestamp(row.date_added.as_deref()).unwrap_or_else(Utc::now),
        personality_tags: row.personality_tags,
        color_scheme: row.color_scheme,
        colors: row.colors,
    }
}

/// Build an insert payload from a create DTO.
///
/// Season defaults to `[all]`. The primary occasion is taken from the
/// draft, else from the first of its occasion set, else casual; both
/// occasion columns are written and kept consistent.
pub fn outfit_row_for_insert(user_id: &UserId, draft: &CreateOutfit, now: Timestamp) -> OutfitRow {
    let season = draft.season.clone().unwrap_or_else(|| vec![Season::All]);
    let occasion = draft
        .occasion
        .clone()
        .or_else(|| draft.occasions.as_ref().and_then(|o| o.first().cloned()))
        .unwrap_or(Occasion::Casual);
    let mut occasions = draft.occasions.clone().unwrap_or_default();
    if !occasions.contains(&occasion) {
        occasions.insert(0, occasion.clone());
    }
    OutfitRow {
        id: None,
        user_id: user_id.clone(),
        name: draft.name.clone(),
        items: draft.items.clone(),
        season: seasons_to(&season),
        occasion: Some(occasion.as_str().to_string()),
        occasions: occasions_to(&occasions),
        favorite: draft.favorite.unwrap_or(false),
        times_worn: 0,
        last_worn: None,
        date_added: Some(now.to_rfc3339()),
        personality_tags: draft.personality_tags.clone().unwrap_or_default(),
        color_scheme: draft.color_scheme.clone(),
        colors: draft.colors.clone().unwrap_or_default(),
    }
}

/// Translate a partial outfit update into row columns.
///
/// The caller (the store) is responsible for enriching the update so that
/// an `occasion` change also carries the merged `occasions` set; this
/// function maps fields one-to-one.
pub fn outfit_patch_from_update(update: &UpdateOutfit) -> OutfitPatch {
    OutfitPatch {
        name: update.name.clone(),
        items: update.items.clone(),
        season: update.season.as_deref().map(seasons_to),
        occasion: update.occasion.as_ref().map(|o| o.as_str().to_string()),
        occasions: update.occasions.as_deref().map(occasions_to),
        favorite: update.favorite,
        times_worn: update.times_worn,
        last_worn: update.last_worn.map(|t| t.to_rfc3339()),
        personality_tags: update.personality_tags.clone(),
        color_scheme: update.color_scheme.clone(),
        colors: update.colors.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_row() -> ClothingItemRow {
        serde_json::from_str(
            r#"{
                "id": "abc123",
                "user_id": "u1",
                "name": "Red Scarf",
                "type": "accessories",
                "color": "red",
                "material": "wool",
                "season": ["winter"],
                "occasions": ["casual"],
                "image_url": "https://img/scarf.jpg",
                "favorite": true,
                "times_worn": 4,
                "last_worn": "2026-01-15T10:00:00Z",
                "date_added": "2025-11-01T09:30:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_item_row_maps_every_column() {
        let item = clothing_item_from_row(item_row());
        assert_eq!(item.id, "abc123");
        assert_eq!(item.name, "Red Scarf");
        assert_eq!(item.kind, GarmentKind::Accessories);
        assert_eq!(item.color, "red");
        assert_eq!(item.material, "wool");
        assert_eq!(item.seasons, vec![Season::Winter]);
        assert_eq!(item.occasions, vec![Occasion::Casual]);
        assert!(item.favorite);
        assert_eq!(item.times_worn, 4);
        assert!(item.last_worn.is_some());
        assert_eq!(item.date_added.to_rfc3339(), "2025-11-01T09:30:00+00:00");
    }

    #[test]
    fn test_item_row_populates_both_image_spellings() {
        let item = clothing_item_from_row(item_row());
        assert_eq!(item.image_url, "https://img/scarf.jpg");
        assert_eq!(item.image, item.image_url);
    }

    #[test]
    fn test_item_row_legacy_image_column_backfills_canonical() {
        let row: ClothingItemRow = serde_json::from_str(
            r#"{"id":"1","user_id":"u1","name":"Old","type":"tops","image":"https://img/old.jpg"}"#,
        )
        .unwrap();
        let item = clothing_item_from_row(row);
        assert_eq!(item.image_url, "https://img/old.jpg");
        assert_eq!(item.image, item.image_url);
    }

    #[test]
    fn test_missing_date_added_defaults_to_now() {
        let mut row = item_row();
        row.date_added = None;
        let before = Utc::now();
        let item = clothing_item_from_row(row);
        assert!(item.date_added >= before);
    }

    #[test]
    fn test_unparsable_last_worn_is_dropped() {
        let mut row = item_row();
        row.last_worn = Some("not-a-date".to_string());
        let item = clothing_item_from_row(row);
        assert!(item.last_worn.is_none());
    }

    #[test]
    fn test_insert_row_applies_draft_defaults() {
        let draft = CreateClothingItem {
            name: "Scarf".to_string(),
            kind: GarmentKind::Accessories,
            color: "red".to_string(),
            material: "wool".to_string(),
            seasons: None,
            occasions: None,
            image_url: None,
            favorite: None,
        };
        let row = clothing_row_for_insert(&"u1".to_string(), &draft, Utc::now());
        assert!(row.id.is_none());
        assert_eq!(row.season, vec!["all".to_string()]);
        assert_eq!(row.occasions, vec!["casual".to_string()]);
        assert!(!row.favorite);
        assert_eq!(row.times_worn, 0);
        assert!(row.date_added.is_some());
    }

    #[test]
    fn test_item_patch_maps_only_present_fields() {
        let patch = clothing_patch_from_update(&UpdateClothingItem {
            favorite: Some(true),
            seasons: Some(vec![Season::Summer]),
            ..Default::default()
        });
        assert_eq!(patch.favorite, Some(true));
        assert_eq!(patch.season, Some(vec!["summer".to_string()]));
        assert!(patch.name.is_none());
        assert!(patch.kind.is_none());
        assert!(patch.times_worn.is_none());
    }

    #[test]
    fn test_outfit_row_duality_on_read() {
        let row: OutfitRow = serde_json::from_str(
            r#"{"id":"o1","user_id":"u1","name":"Look","season":["summer"],"occasions":["work"]}"#,
        )
        .unwrap();
        let outfit = outfit_from_row(row);
        assert_eq!(outfit.season, outfit.seasons);
        assert_eq!(outfit.occasion, Occasion::Work);
        assert!(outfit.occasions.contains(&outfit.occasion));
    }

    #[test]
    fn test_outfit_row_occasion_defaults_to_casual() {
        let row: OutfitRow =
            serde_json::from_str(r#"{"id":"o1","user_id":"u1","name":"Look"}"#).unwrap();
        let outfit = outfit_from_row(row);
        assert_eq!(outfit.occasion, Occasion::Casual);
        assert_eq!(outfit.occasions, vec![Occasion::Casual]);
    }

    #[test]
    fn test_outfit_insert_writes_both_occasion_columns() {
        let draft = CreateOutfit {
            name: "Look".to_string(),
            items: vec!["1".to_string()],
            season: None,
            occasion: Some(Occasion::Formal),
            occasions: None,
            favorite: None,
            personality_tags: None,
            color_scheme: None,
            colors: None,
        };
        let row = outfit_row_for_insert(&"u1".to_string(), &draft, Utc::now());
        assert_eq!(row.occasion.as_deref(), Some("formal"));
        assert_eq!(row.occasions, vec!["formal".to_string()]);
        assert_eq!(row.season, vec!["all".to_string()]);
    }

    #[test]
    fn test_outfit_insert_primary_falls_back_to_first_of_set() {
        let draft = CreateOutfit {
            name: "Look".to_string(),
            items: vec![],
            season: None,
            occasion: None,
            occasions: Some(vec![Occasion::Party, Occasion::Casual]),
            favorite: None,
            personality_tags: None,
            color_scheme: None,
            colors: None,
        };
        let row = outfit_row_for_insert(&"u1".to_string(), &draft, Utc::now());
        assert_eq!(row.occasion.as_deref(), Some("party"));
    }

    #[test]
    fn test_outfit_patch_maps_styling_metadata() {
        let patch = outfit_patch_from_update(&UpdateOutfit {
            personality_tags: Some(vec!["bold".to_string()]),
            color_scheme: Some("monochrome".to_string()),
            colors: Some(vec!["black".to_string(), "white".to_string()]),
            ..Default::default()
        });
        assert_eq!(patch.personality_tags, Some(vec!["bold".to_string()]));
        assert_eq!(patch.color_scheme.as_deref(), Some("monochrome"));
        assert_eq!(patch.colors.as_ref().map(Vec::len), Some(2));
        assert!(patch.name.is_none());
    }
}
