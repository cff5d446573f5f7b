//! Remote-store contract for the lookbook platform.
//!
//! The hosted backend persists wardrobe data in two relational tables
//! (`clothing_items`, `outfits`) reached over an HTTP query API. This
//! crate owns everything on the wire side of that boundary:
//!
//! - [`rows`]: the snake_case row shapes as stored remotely,
//! - [`transcode`]: the pure row ↔ domain mapping functions,
//! - [`client`]: the [`RemoteStore`](client::RemoteStore) trait,
//! - [`rest`]: the PostgREST-convention HTTP implementation,
//! - [`auth`]: the session provider with sign-in/out broadcasting,
//! - [`config`]: environment-based remote configuration.

pub mod auth;
pub mod client;
pub mod config;
pub mod rest;
pub mod rows;
pub mod transcode;

pub use auth::{AuthChange, AuthSession, AuthUser};
pub use client::{RemoteError, RemoteStore};
pub use config::RemoteConfig;
pub use rest::RestRemoteStore;
pub use rows::{ClothingItemPatch, ClothingItemRow, OutfitPatch, OutfitRow};
