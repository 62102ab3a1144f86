//! In-Memory Record Store
//!
//! `BTreeMap` behind a `tokio::sync::RwLock`. Backing store for tests
//! and for single-process deployments.

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::player::{UserId, UserState};
use crate::store::{RecordStore, StoreError};

/// In-memory [`RecordStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<UserId, UserState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl RecordStore for MemoryStore {
    async fn get(&self, user_id: UserId) -> Result<Option<UserState>, StoreError> {
        Ok(self.records.read().await.get(&user_id).cloned())
    }

    async fn create(&self, state: UserState) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.contains_key(&state.user_id) {
            return Err(StoreError::AlreadyExists(state.user_id));
        }
        records.insert(state.user_id, state);
        Ok(())
    }

    async fn update(&self, state: UserState) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        match records.get_mut(&state.user_id) {
            Some(slot) => {
                *slot = state;
                Ok(())
            }
            None => Err(StoreError::NotFound(state.user_id)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
