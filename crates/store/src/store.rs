//! The wardrobe store.
//!
//! One [`WardrobeStore`] exists per running client. It owns the local
//! mirrors of the `clothing_items` and `outfits` tables for the signed-in
//! user and is the only code allowed to mutate them. Consumers read
//! snapshots and call the operations; they never write state directly.
//!
//! Every mutation follows the same discipline: confirm against the remote
//! store first, then apply the identical change locally. Loads replace a
//! collection wholesale on success and leave it untouched on failure.
//! There is no optimistic update anywhere in this module.

use std::sync::{Arc, Mutex, Weak};

use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;

use lookbook_core::error::CoreError;
use lookbook_core::item::{ClothingItem, CreateClothingItem, UpdateClothingItem};
use lookbook_core::outfit::{CreateOutfit, Outfit, UpdateOutfit};
use lookbook_core::types::RecordId;
use lookbook_remote::auth::{AuthChange, AuthSession, AuthUser};
use lookbook_remote::client::RemoteStore;
use lookbook_remote::transcode::{
    clothing_item_from_row, clothing_patch_from_update, clothing_row_for_insert, outfit_from_row,
    outfit_patch_from_update, outfit_row_for_insert,
};

use crate::error::{StoreError, StoreResult};
use crate::notice::NoticeBus;

/// Mirrored collections and their loading flags.
#[derive(Default)]
struct WardrobeState {
    clothing_items: Vec<ClothingItem>,
    outfits: Vec<Outfit>,
    loading_items: bool,
    loading_outfits: bool,
}

/// In-memory mirror of one user's wardrobe, synchronized with the remote
/// store.
pub struct WardrobeStore {
    remote: Arc<dyn RemoteStore>,
    auth: Arc<AuthSession>,
    notices: NoticeBus,
    state: RwLock<WardrobeState>,
    watcher: Mutex<Option<JoinHandle<()>>>,
    /// Back-reference handed to the auth watcher task.
    weak: Weak<Self>,
}

impl WardrobeStore {
    pub fn new(remote: Arc<dyn RemoteStore>, auth: Arc<AuthSession>) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            remote,
            auth,
            notices: NoticeBus::new(),
            state: RwLock::new(WardrobeState::default()),
            watcher: Mutex::new(None),
            weak: weak.clone(),
        })
    }

    /// The notice channel. UI layers subscribe here for toast-style
    /// notifications; the store itself never touches presentation.
    pub fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Start watching auth transitions: sign-in reloads both collections,
    /// sign-out clears them so one user's rows never leak into the next
    /// session. Idempotent; a prior watcher is replaced.
    pub fn init(&self) {
        let Some(store) = self.weak.upgrade() else {
            return;
        };
        let mut rx = self.auth.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(AuthChange::SignedIn(user)) => {
                        tracing::info!(user_id = %user.user_id, "signed in, reloading wardrobe");
                        store.load_clothing_items().await;
                        store.load_outfits().await;
                    }
                    Ok(AuthChange::SignedOut) => {
                        tracing::info!("signed out, clearing wardrobe");
                        store.clear_all().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "auth watcher lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        let mut watcher = self.watcher.lock().expect("watcher lock poisoned");
        if let Some(previous) = watcher.replace(handle) {
            previous.abort();
        }
    }

    /// Stop the auth watcher and drop all local state.
    pub async fn teardown(&self) {
        let handle = {
            let mut watcher = self.watcher.lock().expect("watcher lock poisoned");
            watcher.take()
        };
        if let Some(handle) = handle {
            handle.abort();
        }
        self.clear_all().await;
    }

    async fn clear_all(&self) {
        let mut state = self.state.write().await;
        *state = WardrobeState::default();
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    pub async fn clothing_items(&self) -> Vec<ClothingItem> {
        self.state.read().await.clothing_items.clone()
    }

    pub async fn outfits(&self) -> Vec<Outfit> {
        self.state.read().await.outfits.clone()
    }

    /// True only while a clothing item load is in flight.
    pub async fn is_loading_items(&self) -> bool {
        self.state.read().await.loading_items
    }

    /// True only while an outfit load is in flight.
    pub async fn is_loading_outfits(&self) -> bool {
        self.state.read().await.loading_outfits
    }

    // -----------------------------------------------------------------------
    // Loads
    // -----------------------------------------------------------------------

    /// Reload the clothing item mirror from the remote store.
    ///
    /// No-op without a signed-in user (existing state is kept). On remote
    /// failure the collection is left exactly as it was. Overlapping
    /// calls are not coalesced; the last response to resolve wins.
    pub async fn load_clothing_items(&self) {
        let Some(user) = self.auth.current_user() else {
            return;
        };
        self.state.write().await.loading_items = true;

        let result = self.remote.list_clothing_items(&user.user_id).await;
        let mut state = self.state.write().await;
        match result {
            Ok(rows) => {
                state.clothing_items = rows.into_iter().map(clothing_item_from_row).collect();
                tracing::debug!(
                    user_id = %user.user_id,
                    count = state.clothing_items.len(),
                    "clothing items loaded"
                );
            }
            Err(err) => {
                tracing::warn!(user_id = %user.user_id, error = %err, "failed to load clothing items");
                self.notices.error("Could not load your wardrobe");
            }
        }
        state.loading_items = false;
    }

    /// Reload the outfit mirror from the remote store. Same contract as
    /// [`load_clothing_items`](Self::load_clothing_items).
    pub async fn load_outfits(&self) {
        let Some(user) = self.auth.current_user() else {
            return;
        };
        self.state.write().await.loading_outfits = true;

        let result = self.remote.list_outfits(&user.user_id).await;
        let mut state = self.state.write().await;
        match result {
            Ok(rows) => {
                state.outfits = rows.into_iter().map(outfit_from_row).collect();
                tracing::debug!(
                    user_id = %user.user_id,
                    count = state.outfits.len(),
                    "outfits loaded"
                );
            }
            Err(err) => {
                tracing::warn!(user_id = %user.user_id, error = %err, "failed to load outfits");
                self.notices.error("Could not load your outfits");
            }
        }
        state.loading_outfits = false;
    }

    // -----------------------------------------------------------------------
    // Clothing item mutations
    // -----------------------------------------------------------------------

    /// Create a clothing item.
    ///
    /// Unset draft fields receive defaults (seasons `[all]`, occasions
    /// `[casual]`, counters 0). The returned item carries the id assigned
    /// by the remote store, never a client-generated one.
    pub async fn add_clothing_item(&self, draft: CreateClothingItem) -> StoreResult<ClothingItem> {
        let user = self.require_user("Sign in to add items to your wardrobe")?;
        if let Err(err) = draft.validate() {
            self.notices.error("Give the item a name before saving");
            return Err(err.into());
        }
        let row = clothing_row_for_insert(&user.user_id, &draft, Utc::now());
        match self.remote.insert_clothing_item(&row).await {
            Ok(created) => {
                let item = clothing_item_from_row(created);
                self.state.write().await.clothing_items.push(item.clone());
                tracing::info!(item_id = %item.id, user_id = %user.user_id, "clothing item added");
                self.notices
                    .success(format!("Added {} to your wardrobe", item.name));
                Ok(item)
            }
            Err(err) => {
                tracing::warn!(user_id = %user.user_id, error = %err, "failed to add clothing item");
                self.notices.error("Could not add the item");
                Err(err.into())
            }
        }
    }

    /// Apply a partial update to a clothing item. Only the fields present
    /// in `update` are written remotely or merged locally, and the local
    /// merge happens only after the remote confirms.
    pub async fn update_clothing_item(
        &self,
        id: &RecordId,
        update: UpdateClothingItem,
    ) -> StoreResult<()> {
        let user = self.require_user("Sign in to update your wardrobe")?;
        let patch = clothing_patch_from_update(&update);
        match self
            .remote
            .update_clothing_item(id, &user.user_id, &patch)
            .await
        {
            Ok(()) => {
                let mut state = self.state.write().await;
                if let Some(item) = state.clothing_items.iter_mut().find(|i| i.id == *id) {
                    update.apply_to(item);
                }
                tracing::debug!(item_id = %id, user_id = %user.user_id, "clothing item updated");
                self.notices.success("Wardrobe updated");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(item_id = %id, user_id = %user.user_id, error = %err, "failed to update clothing item");
                self.notices.error("Could not update the item");
                Err(err.into())
            }
        }
    }

    /// Delete a clothing item.
    ///
    /// Outfits referencing the item are deliberately left untouched;
    /// their dangling references are tolerated by consumers.
    pub async fn delete_clothing_item(&self, id: &RecordId) -> StoreResult<()> {
        let user = self.require_user("Sign in to manage your wardrobe")?;
        match self.remote.delete_clothing_item(id, &user.user_id).await {
            Ok(()) => {
                self.state
                    .write()
                    .await
                    .clothing_items
                    .retain(|i| i.id != *id);
                tracing::info!(item_id = %id, user_id = %user.user_id, "clothing item deleted");
                self.notices.success("Item removed from your wardrobe");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(item_id = %id, user_id = %user.user_id, error = %err, "failed to delete clothing item");
                self.notices.error("Could not remove the item");
                Err(err.into())
            }
        }
    }

    /// Flip an item's favorite flag. Returns the new value.
    pub async fn toggle_favorite_item(&self, id: &RecordId) -> StoreResult<bool> {
        let favorite = {
            let state = self.state.read().await;
            state
                .clothing_items
                .iter()
                .find(|i| i.id == *id)
                .map(|i| i.favorite)
        };
        let Some(favorite) = favorite else {
            self.notices.error("That item is no longer in your wardrobe");
            return Err(StoreError::Core(CoreError::NotFound {
                entity: "clothing item",
                id: id.clone(),
            }));
        };
        self.update_clothing_item(
            id,
            UpdateClothingItem {
                favorite: Some(!favorite),
                ..Default::default()
            },
        )
        .await?;
        Ok(!favorite)
    }

    /// Record a wear: bump `times_worn` and stamp `last_worn`.
    pub async fn record_item_worn(&self, id: &RecordId) -> StoreResult<()> {
        let times_worn = {
            let state = self.state.read().await;
            state
                .clothing_items
                .iter()
                .find(|i| i.id == *id)
                .map(|i| i.times_worn)
        };
        let Some(times_worn) = times_worn else {
            self.notices.error("That item is no longer in your wardrobe");
            return Err(StoreError::Core(CoreError::NotFound {
                entity: "clothing item",
                id: id.clone(),
            }));
        };
        self.update_clothing_item(
            id,
            UpdateClothingItem {
                times_worn: Some(times_worn + 1),
                last_worn: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Outfit mutations
    // -----------------------------------------------------------------------

    /// Create an outfit. Item references are stored as bare ids and never
    /// validated against the clothing collection.
    pub async fn add_outfit(&self, draft: CreateOutfit) -> StoreResult<Outfit> {
        let user = self.require_user("Sign in to save outfits")?;
        if let Err(err) = draft.validate() {
            self.notices.error("Give the outfit a name before saving");
            return Err(err.into());
        }
        let row = outfit_row_for_insert(&user.user_id, &draft, Utc::now());
        match self.remote.insert_outfit(&row).await {
            Ok(created) => {
                let outfit = outfit_from_row(created);
                self.state.write().await.outfits.push(outfit.clone());
                tracing::info!(outfit_id = %outfit.id, user_id = %user.user_id, "outfit added");
                self.notices
                    .success(format!("Saved outfit {}", outfit.name));
                Ok(outfit)
            }
            Err(err) => {
                tracing::warn!(user_id = %user.user_id, error = %err, "failed to add outfit");
                self.notices.error("Could not save the outfit");
                Err(err.into())
            }
        }
    }

    /// Apply a partial update to an outfit.
    ///
    /// When the update changes the primary `occasion` without supplying a
    /// full `occasions` set, the set is enriched from the local record so
    /// the remote row keeps containing its primary occasion.
    pub async fn update_outfit(&self, id: &RecordId, update: UpdateOutfit) -> StoreResult<()> {
        let user = self.require_user("Sign in to update your outfits")?;

        let mut update = update;
        if let (Some(occasion), None) = (&update.occasion, &update.occasions) {
            let state = self.state.read().await;
            if let Some(current) = state.outfits.iter().find(|o| o.id == *id) {
                let mut occasions = current.occasions.clone();
                if !occasions.contains(occasion) {
                    occasions.insert(0, occasion.clone());
                }
                update.occasions = Some(occasions);
            }
        }

        let patch = outfit_patch_from_update(&update);
        match self.remote.update_outfit(id, &user.user_id, &patch).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                if let Some(outfit) = state.outfits.iter_mut().find(|o| o.id == *id) {
                    update.apply_to(outfit);
                }
                tracing::debug!(outfit_id = %id, user_id = %user.user_id, "outfit updated");
                self.notices.success("Outfit updated");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(outfit_id = %id, user_id = %user.user_id, error = %err, "failed to update outfit");
                self.notices.error("Could not update the outfit");
                Err(err.into())
            }
        }
    }

    /// Delete an outfit. Referenced items are untouched.
    pub async fn delete_outfit(&self, id: &RecordId) -> StoreResult<()> {
        let user = self.require_user("Sign in to manage your outfits")?;
        match self.remote.delete_outfit(id, &user.user_id).await {
            Ok(()) => {
                self.state.write().await.outfits.retain(|o| o.id != *id);
                tracing::info!(outfit_id = %id, user_id = %user.user_id, "outfit deleted");
                self.notices.success("Outfit deleted");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(outfit_id = %id, user_id = %user.user_id, error = %err, "failed to delete outfit");
                self.notices.error("Could not delete the outfit");
                Err(err.into())
            }
        }
    }

    /// Flip an outfit's favorite flag. Returns the new value.
    pub async fn toggle_favorite_outfit(&self, id: &RecordId) -> StoreResult<bool> {
        let favorite = {
            let state = self.state.read().await;
            state.outfits.iter().find(|o| o.id == *id).map(|o| o.favorite)
        };
        let Some(favorite) = favorite else {
            self.notices.error("That outfit no longer exists");
            return Err(StoreError::Core(CoreError::NotFound {
                entity: "outfit",
                id: id.clone(),
            }));
        };
        self.update_outfit(
            id,
            UpdateOutfit {
                favorite: Some(!favorite),
                ..Default::default()
            },
        )
        .await?;
        Ok(!favorite)
    }

    /// Record an outfit wear, then record a wear on each referenced item
    /// that still exists. Dangling references are skipped; an individual
    /// item failure is logged and does not fail the outfit wear.
    pub async fn record_outfit_worn(&self, id: &RecordId) -> StoreResult<()> {
        let snapshot = {
            let state = self.state.read().await;
            state
                .outfits
                .iter()
                .find(|o| o.id == *id)
                .map(|o| (o.times_worn, o.items.clone()))
        };
        let Some((times_worn, item_ids)) = snapshot else {
            self.notices.error("That outfit no longer exists");
            return Err(StoreError::Core(CoreError::NotFound {
                entity: "outfit",
                id: id.clone(),
            }));
        };

        self.update_outfit(
            id,
            UpdateOutfit {
                times_worn: Some(times_worn + 1),
                last_worn: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await?;

        for item_id in item_ids {
            let exists = {
                let state = self.state.read().await;
                state.clothing_items.iter().any(|i| i.id == item_id)
            };
            if !exists {
                // Dangling reference; item was deleted after the outfit
                // was saved.
                continue;
            }
            if let Err(err) = self.record_item_worn(&item_id).await {
                tracing::warn!(outfit_id = %id, item_id = %item_id, error = %err, "failed to record item wear");
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn require_user(&self, denied: &str) -> StoreResult<AuthUser> {
        match self.auth.current_user() {
            Some(user) => Ok(user),
            None => {
                self.notices.error(denied);
                Err(StoreError::Unauthenticated)
            }
        }
    }
}
