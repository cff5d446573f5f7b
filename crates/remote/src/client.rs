//! The remote store contract.
//!
//! [`RemoteStore`] is the seam between the wardrobe store and the hosted
//! backend. The production implementation is
//! [`RestRemoteStore`](crate::rest::RestRemoteStore); tests substitute an
//! in-memory double.
//!
//! Every operation is scoped: reads filter by `user_id`, mutations by
//! record id AND `user_id`. A mutation that matches zero rows (wrong
//! owner, unknown id) reports success with no effect, mirroring the
//! backend's row-level filtering; callers treat any returned error as
//! failure regardless of payload.

use async_trait::async_trait;

use lookbook_core::types::{RecordId, UserId};

use crate::rows::{ClothingItemPatch, ClothingItemRow, OutfitPatch, OutfitRow};

/// Errors produced by a remote store implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a usable response (DNS, TLS, refused
    /// connection, interrupted body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Remote API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded into the expected rows.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

/// Asynchronous query/insert/update/delete access to the two wardrobe
/// tables, always scoped to one owning user.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All clothing item rows owned by `user_id`, in remote query order.
    async fn list_clothing_items(&self, user_id: &UserId)
        -> Result<Vec<ClothingItemRow>, RemoteError>;

    /// Insert a clothing item row; the returned row carries the
    /// remote-assigned id.
    async fn insert_clothing_item(
        &self,
        row: &ClothingItemRow,
    ) -> Result<ClothingItemRow, RemoteError>;

    /// Apply a partial update to the row matching both `id` and `user_id`.
    async fn update_clothing_item(
        &self,
        id: &RecordId,
        user_id: &UserId,
        patch: &ClothingItemPatch,
    ) -> Result<(), RemoteError>;

    /// Delete the row matching both `id` and `user_id`.
    async fn delete_clothing_item(
        &self,
        id: &RecordId,
        user_id: &UserId,
    ) -> Result<(), RemoteError>;

    /// All outfit rows owned by `user_id`, in remote query order.
    async fn list_outfits(&self, user_id: &UserId) -> Result<Vec<OutfitRow>, RemoteError>;

    /// Insert an outfit row; the returned row carries the remote-assigned id.
    async fn insert_outfit(&self, row: &OutfitRow) -> Result<OutfitRow, RemoteError>;

    /// Apply a partial update to the outfit matching both `id` and `user_id`.
    async fn update_outfit(
        &self,
        id: &RecordId,
        user_id: &UserId,
        patch: &OutfitPatch,
    ) -> Result<(), RemoteError>;

    /// Delete the outfit matching both `id` and `user_id`.
    async fn delete_outfit(&self, id: &RecordId, user_id: &UserId) -> Result<(), RemoteError>;
}
