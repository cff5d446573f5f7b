//! Garment, season, and occasion vocabulary.
//!
//! All three enums serialize to lowercase strings and tolerate unknown
//! values via an `Other` arm, so rows written by newer clients never fail
//! to load. Colors and materials are free vocabulary and stay plain
//! strings in the domain model.

use serde::{Deserialize, Serialize};

/// Top-level garment category of a clothing item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentKind {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
    #[serde(untagged)]
    Other(String),
}

impl GarmentKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tops => "tops",
            Self::Bottoms => "bottoms",
            Self::Dresses => "dresses",
            Self::Outerwear => "outerwear",
            Self::Shoes => "shoes",
            Self::Accessories => "accessories",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "tops" => Self::Tops,
            "bottoms" => Self::Bottoms,
            "dresses" => Self::Dresses,
            "outerwear" => Self::Outerwear,
            "shoes" => Self::Shoes,
            "accessories" => Self::Accessories,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Season tag for items and outfits. `All` marks season-agnostic pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    All,
    #[serde(untagged)]
    Other(String),
}

impl Season {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
            Self::All => "all",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "spring" => Self::Spring,
            "summer" => Self::Summer,
            "fall" => Self::Fall,
            "winter" => Self::Winter,
            "all" => Self::All,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Occasion tag for items and outfits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Casual,
    Work,
    Formal,
    Sport,
    Party,
    #[serde(untagged)]
    Other(String),
}

impl Occasion {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Casual => "casual",
            Self::Work => "work",
            Self::Formal => "formal",
            Self::Sport => "sport",
            Self::Party => "party",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "casual" => Self::Casual,
            "work" => Self::Work,
            "formal" => Self::Formal,
            "sport" => Self::Sport,
            "party" => Self::Party,
            other => Self::Other(other.to_string()),
        }
    }
}
