//! Record Store
//!
//! Key-value persistence seam for player records. The reconciliation
//! service depends on the [`RecordStore`] trait rather than a concrete
//! backend so tests can substitute doubles and deployments can swap the
//! storage engine.
//!
//! Each operation is atomic on its own; callers serialize whole
//! read-modify-write sequences themselves (the service holds a per-user
//! lock across them).

pub mod memory;

use std::future::Future;

use thiserror::Error;

use crate::player::{UserId, UserState};

pub use memory::MemoryStore;

/// Record store errors.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No record exists for the requested user id.
    #[error("no record for user {0}")]
    NotFound(UserId),

    /// A record already exists for the user id.
    #[error("record already exists for user {0}")]
    AlreadyExists(UserId),

    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value persistence for player records, keyed by user id.
pub trait RecordStore: Send + Sync {
    /// Fetch the record for a user, if one exists.
    fn get(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<UserState>, StoreError>> + Send;

    /// Insert a new record. Fails with [`StoreError::AlreadyExists`] if
    /// the user id is already present.
    fn create(&self, state: UserState) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace the record for an existing user. Fails with
    /// [`StoreError::NotFound`] if no record exists; never creates one.
    fn update(&self, state: UserState) -> impl Future<Output = Result<(), StoreError>> + Send;
}
