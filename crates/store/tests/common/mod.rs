//! Shared test double: an in-memory remote store with failure injection,
//! call counting, and scripted per-call response delays.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use lookbook_core::types::{RecordId, UserId};
use lookbook_remote::auth::{AuthSession, AuthUser};
use lookbook_remote::client::{RemoteError, RemoteStore};
use lookbook_remote::rows::{ClothingItemPatch, ClothingItemRow, OutfitPatch, OutfitRow};
use lookbook_store::WardrobeStore;

pub struct MockRemoteStore {
    pub items: Mutex<Vec<ClothingItemRow>>,
    pub outfits: Mutex<Vec<OutfitRow>>,
    next_id: AtomicU64,
    /// When set, every call fails with a transport error.
    pub fail: AtomicBool,
    /// Total remote calls observed, across all operations.
    pub calls: AtomicU64,
    /// Scripted delays (ms) consumed by successive `list_outfits` calls.
    pub outfit_list_delays: Mutex<VecDeque<u64>>,
}

impl MockRemoteStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(Vec::new()),
            outfits: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            fail: AtomicBool::new(false),
            calls: AtomicU64::new(0),
            outfit_list_delays: Mutex::new(VecDeque::new()),
        })
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seed_item(&self, row: ClothingItemRow) {
        self.items.lock().unwrap().push(row);
    }

    pub fn seed_outfit(&self, row: OutfitRow) {
        self.outfits.lock().unwrap().push(row);
    }

    pub fn replace_outfits(&self, rows: Vec<OutfitRow>) {
        *self.outfits.lock().unwrap() = rows;
    }

    pub fn push_outfit_list_delay(&self, millis: u64) {
        self.outfit_list_delays.lock().unwrap().push_back(millis);
    }

    fn record_call(&self) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            Err(RemoteError::Transport("injected failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn assign_id(&self) -> String {
        format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

fn apply_item_patch(row: &mut ClothingItemRow, patch: &ClothingItemPatch) {
    if let Some(v) = &patch.name {
        row.name = v.clone();
    }
    if let Some(v) = &patch.kind {
        row.kind = v.clone();
    }
    if let Some(v) = &patch.color {
        row.color = v.clone();
    }
    if let Some(v) = &patch.material {
        row.material = v.clone();
    }
    if let Some(v) = &patch.season {
        row.season = v.clone();
    }
    if let Some(v) = &patch.occasions {
        row.occasions = v.clone();
    }
    if let Some(v) = &patch.image_url {
        row.image_url = Some(v.clone());
    }
    if let Some(v) = patch.favorite {
        row.favorite = v;
    }
    if let Some(v) = patch.times_worn {
        row.times_worn = v;
    }
    if let Some(v) = &patch.last_worn {
        row.last_worn = Some(v.clone());
    }
}

fn apply_outfit_patch(row: &mut OutfitRow, patch: &OutfitPatch) {
    if let Some(v) = &patch.name {
        row.name = v.clone();
    }
    if let Some(v) = &patch.items {
        row.items = v.clone();
    }
    if let Some(v) = &patch.season {
        row.season = v.clone();
    }
    if let Some(v) = &patch.occasion {
        row.occasion = Some(v.clone());
    }
    if let Some(v) = &patch.occasions {
        row.occasions = v.clone();
    }
    if let Some(v) = patch.favorite {
        row.favorite = v;
    }
    if let Some(v) = patch.times_worn {
        row.times_worn = v;
    }
    if let Some(v) = &patch.last_worn {
        row.last_worn = Some(v.clone());
    }
    if let Some(v) = &patch.personality_tags {
        row.personality_tags = v.clone();
    }
    if let Some(v) = &patch.color_scheme {
        row.color_scheme = Some(v.clone());
    }
    if let Some(v) = &patch.colors {
        row.colors = v.clone();
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn list_clothing_items(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ClothingItemRow>, RemoteError> {
        self.record_call()?;
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn insert_clothing_item(
        &self,
        row: &ClothingItemRow,
    ) -> Result<ClothingItemRow, RemoteError> {
        self.record_call()?;
        let mut created = row.clone();
        created.id = Some(self.assign_id());
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_clothing_item(
        &self,
        id: &RecordId,
        user_id: &UserId,
        patch: &ClothingItemPatch,
    ) -> Result<(), RemoteError> {
        self.record_call()?;
        let mut items = self.items.lock().unwrap();
        // Zero matched rows is not an error, mirroring the backend.
        if let Some(row) = items
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(id.as_str()) && r.user_id == *user_id)
        {
            apply_item_patch(row, patch);
        }
        Ok(())
    }

    async fn delete_clothing_item(
        &self,
        id: &RecordId,
        user_id: &UserId,
    ) -> Result<(), RemoteError> {
        self.record_call()?;
        self.items
            .lock()
            .unwrap()
            .retain(|r| !(r.id.as_deref() == Some(id.as_str()) && r.user_id == *user_id));
        Ok(())
    }

    async fn list_outfits(&self, user_id: &UserId) -> Result<Vec<OutfitRow>, RemoteError> {
        self.record_call()?;
        // Snapshot before any scripted delay so a response reflects the
        // data as it was when the request was issued.
        let snapshot: Vec<OutfitRow> = self
            .outfits
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect();
        let delay = self.outfit_list_delays.lock().unwrap().pop_front();
        if let Some(millis) = delay {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
        Ok(snapshot)
    }

    async fn insert_outfit(&self, row: &OutfitRow) -> Result<OutfitRow, RemoteError> {
        self.record_call()?;
        let mut created = row.clone();
        created.id = Some(self.assign_id());
        self.outfits.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_outfit(
        &self,
        id: &RecordId,
        user_id: &UserId,
        patch: &OutfitPatch,
    ) -> Result<(), RemoteError> {
        self.record_call()?;
        let mut outfits = self.outfits.lock().unwrap();
        if let Some(row) = outfits
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(id.as_str()) && r.user_id == *user_id)
        {
            apply_outfit_patch(row, patch);
        }
        Ok(())
    }

    async fn delete_outfit(&self, id: &RecordId, user_id: &UserId) -> Result<(), RemoteError> {
        self.record_call()?;
        self.outfits
            .lock()
            .unwrap()
            .retain(|r| !(r.id.as_deref() == Some(id.as_str()) && r.user_id == *user_id));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn auth_user(id: &str) -> AuthUser {
    AuthUser {
        user_id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        access_token: format!("token-{id}"),
    }
}

pub fn item_row(id: &str, user_id: &str, name: &str) -> ClothingItemRow {
    ClothingItemRow {
        id: Some(id.to_string()),
        user_id: user_id.to_string(),
        name: name.to_string(),
        kind: "tops".to_string(),
        color: "blue".to_string(),
        material: "cotton".to_string(),
        season: vec!["all".to_string()],
        occasions: vec!["casual".to_string()],
        image_url: Some(format!("https://img/{id}.jpg")),
        image: None,
        favorite: false,
        times_worn: 0,
        last_worn: None,
        date_added: Some("2026-01-01T00:00:00Z".to_string()),
    }
}

pub fn outfit_row(id: &str, user_id: &str, name: &str, items: &[&str]) -> OutfitRow {
    OutfitRow {
        id: Some(id.to_string()),
        user_id: user_id.to_string(),
        name: name.to_string(),
        items: items.iter().map(|s| s.to_string()).collect(),
        season: vec!["all".to_string()],
        occasion: Some("casual".to_string()),
        occasions: vec!["casual".to_string()],
        favorite: false,
        times_worn: 0,
        last_worn: None,
        date_added: Some("2026-01-01T00:00:00Z".to_string()),
        personality_tags: vec![],
        color_scheme: None,
        colors: vec![],
    }
}

/// A store wired to a fresh mock remote and auth session.
pub fn setup() -> (Arc<MockRemoteStore>, Arc<AuthSession>, Arc<WardrobeStore>) {
    let remote = MockRemoteStore::new();
    let auth = Arc::new(AuthSession::new());
    let store = WardrobeStore::new(remote.clone(), auth.clone());
    (remote, auth, store)
}

/// Poll the clothing collection until `predicate` holds or a short
/// deadline passes.
pub async fn wait_for_items<F>(store: &WardrobeStore, predicate: F) -> bool
where
    F: Fn(&[lookbook_core::ClothingItem]) -> bool,
{
    for _ in 0..100 {
        if predicate(&store.clothing_items().await) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Poll the outfit collection until `predicate` holds or a short deadline
/// passes.
pub async fn wait_for_outfits<F>(store: &WardrobeStore, predicate: F) -> bool
where
    F: Fn(&[lookbook_core::Outfit]) -> bool,
{
    for _ in 0..100 {
        if predicate(&store.outfits().await) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
