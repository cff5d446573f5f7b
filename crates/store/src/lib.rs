//! Wardrobe state synchronization.
//!
//! [`WardrobeStore`] is the single authoritative in-memory mirror of one
//! user's clothing items and outfits. It talks to the remote store
//! through the [`RemoteStore`](lookbook_remote::RemoteStore) contract,
//! never mutates local state before the remote confirms, and publishes
//! user-facing [`Notice`]s on every success and failure path.

pub mod error;
pub mod notice;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use notice::{Notice, NoticeBus, Severity};
pub use store::WardrobeStore;
