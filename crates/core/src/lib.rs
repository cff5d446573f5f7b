//! Domain model for the lookbook wardrobe platform.
//!
//! Defines the in-memory (camelCase-concept) shapes of clothing items and
//! outfits, the garment/season/occasion taxonomy, and the create/update
//! DTOs used by the store layer. Remote row shapes live in
//! `lookbook-remote`.

pub mod error;
pub mod item;
pub mod outfit;
pub mod taxonomy;
pub mod types;

pub use error::CoreError;
pub use item::{ClothingItem, CreateClothingItem, UpdateClothingItem};
pub use outfit::{CreateOutfit, Outfit, UpdateOutfit};
pub use taxonomy::{GarmentKind, Occasion, Season};
