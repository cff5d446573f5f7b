//! HTTP implementation of [`RemoteStore`] against the hosted backend's
//! PostgREST-style query API.
//!
//! Row filters travel as query parameters (`user_id=eq.<id>`), inserts
//! ask for the created row back via `Prefer: return=representation`, and
//! partial updates are `PATCH` requests whose JSON body contains only the
//! columns being changed. Every request carries the project API key; the
//! signed-in user's bearer token is attached when one has been set, which
//! is what makes the backend's row-level ownership checks effective.

use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use async_trait::async_trait;
use lookbook_core::types::{RecordId, UserId};

use crate::client::{RemoteError, RemoteStore};
use crate::config::RemoteConfig;
use crate::rows::{ClothingItemPatch, ClothingItemRow, OutfitPatch, OutfitRow};

const CLOTHING_ITEMS_TABLE: &str = "clothing_items";
const OUTFITS_TABLE: &str = "outfits";

/// PostgREST-convention client for the two wardrobe tables.
pub struct RestRemoteStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: RwLock<Option<String>>,
}

impl RestRemoteStore {
    /// Build a client from configuration.
    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            access_token: RwLock::new(None),
        })
    }

    /// Attach the signed-in user's bearer token to subsequent requests.
    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut guard = self.access_token.write().expect("token lock poisoned");
        *guard = Some(token.into());
    }

    /// Drop the bearer token (on sign-out).
    pub fn clear_access_token(&self) {
        let mut guard = self.access_token.write().expect("token lock poisoned");
        *guard = None;
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn eq_filter(value: &str) -> String {
        format!("eq.{value}")
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("apikey", &self.api_key);
        let token = self.access_token.read().expect("token lock poisoned");
        match token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Surface non-success statuses as [`RemoteError::Api`] with the
    /// response body as the (logged-only) message.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn list_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        user_id: &UserId,
    ) -> Result<Vec<T>, RemoteError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, table, user_id = %user_id, "listing rows");
        let response = self
            .authorize(self.http.get(self.table_url(table)))
            .query(&[
                ("select", "*".to_string()),
                ("user_id", Self::eq_filter(user_id)),
            ])
            .send()
            .await?;
        let rows = Self::check(response).await?.json::<Vec<T>>().await?;
        Ok(rows)
    }

    async fn insert_row<T: DeserializeOwned + Serialize>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<T, RemoteError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, table, "inserting row");
        let response = self
            .authorize(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let mut created = Self::check(response).await?.json::<Vec<T>>().await?;
        if created.is_empty() {
            return Err(RemoteError::Decode(format!(
                "insert into {table} returned no representation"
            )));
        }
        Ok(created.remove(0))
    }

    async fn patch_row<T: Serialize>(
        &self,
        table: &str,
        id: &RecordId,
        user_id: &UserId,
        patch: &T,
    ) -> Result<(), RemoteError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, table, id = %id, user_id = %user_id, "patching row");
        let response = self
            .authorize(self.http.patch(self.table_url(table)))
            .query(&[
                ("id", Self::eq_filter(id)),
                ("user_id", Self::eq_filter(user_id)),
            ])
            .json(patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_row(
        &self,
        table: &str,
        id: &RecordId,
        user_id: &UserId,
    ) -> Result<(), RemoteError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, table, id = %id, user_id = %user_id, "deleting row");
        let response = self
            .authorize(self.http.delete(self.table_url(table)))
            .query(&[
                ("id", Self::eq_filter(id)),
                ("user_id", Self::eq_filter(user_id)),
            ])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for RestRemoteStore {
    async fn list_clothing_items(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ClothingItemRow>, RemoteError> {
        self.list_rows(CLOTHING_ITEMS_TABLE, user_id).await
    }

    async fn insert_clothing_item(
        &self,
        row: &ClothingItemRow,
    ) -> Result<ClothingItemRow, RemoteError> {
        self.insert_row(CLOTHING_ITEMS_TABLE, row).await
    }

    async fn update_clothing_item(
        &self,
        id: &RecordId,
        user_id: &UserId,
        patch: &ClothingItemPatch,
    ) -> Result<(), RemoteError> {
        self.patch_row(CLOTHING_ITEMS_TABLE, id, user_id, patch).await
    }

    async fn delete_clothing_item(
        &self,
        id: &RecordId,
        user_id: &UserId,
    ) -> Result<(), RemoteError> {
        self.delete_row(CLOTHING_ITEMS_TABLE, id, user_id).await
    }

    async fn list_outfits(&self, user_id: &UserId) -> Result<Vec<OutfitRow>, RemoteError> {
        self.list_rows(OUTFITS_TABLE, user_id).await
    }

    async fn insert_outfit(&self, row: &OutfitRow) -> Result<OutfitRow, RemoteError> {
        self.insert_row(OUTFITS_TABLE, row).await
    }

    async fn update_outfit(
        &self,
        id: &RecordId,
        user_id: &UserId,
        patch: &OutfitPatch,
    ) -> Result<(), RemoteError> {
        self.patch_row(OUTFITS_TABLE, id, user_id, patch).await
    }

    async fn delete_outfit(&self, id: &RecordId, user_id: &UserId) -> Result<(), RemoteError> {
        self.delete_row(OUTFITS_TABLE, id, user_id).await
    }
}
