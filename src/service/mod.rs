//! Reconciliation Service
//!
//! Bridges the economy model to persisted state. [`EconomyService::get_state`]
//! folds elapsed offline time into a player's record; [`EconomyService::save_state`]
//! lets the client push its own authoritative snapshot (used when the
//! client's local simulation, e.g. active tapping, has diverged from the
//! last-synced server state).
//!
//! Both operations run inside a per-user critical section, so the
//! read-compute-write sequence for one user never interleaves with a
//! concurrent call for the same user. The store write is the only
//! mutation; a call cancelled before it leaves the record untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::economy::model::{reconcile, EconomyConfig};
use crate::player::{StateView, UserId, UserState};
use crate::store::{RecordStore, StoreError};

/// Client-supplied snapshot for [`EconomyService::save_state`].
///
/// `energy` and `level` are optional for compatibility with older
/// clients that submit only the score; a missing field preserves the
/// stored value instead of zeroing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveSnapshot {
    /// Score asserted by the client.
    pub score: u64,

    /// Energy asserted by the client, if submitted.
    pub energy: Option<u32>,

    /// Level asserted by the client, if submitted.
    pub level: Option<u32>,
}

impl SaveSnapshot {
    /// Snapshot with all fields supplied.
    pub fn full(score: u64, energy: u32, level: u32) -> Self {
        Self {
            score,
            energy: Some(energy),
            level: Some(level),
        }
    }

    /// Score-only snapshot (legacy client body).
    pub fn score_only(score: u64) -> Self {
        Self {
            score,
            energy: None,
            level: None,
        }
    }
}

/// Reconciliation service errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// A save targeted a user id with no stored record. Saves never
    /// create records; only `get_state` does.
    #[error("unknown user {0}")]
    UnknownUser(UserId),

    /// The record store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// The reconciliation service.
///
/// Holds the record store and economy config as explicit dependencies.
/// A lock registry keyed by user id serializes all state transitions
/// per user; distinct users never contend.
pub struct EconomyService<S> {
    store: S,
    config: EconomyConfig,
    locks: Mutex<BTreeMap<UserId, Arc<Mutex<()>>>>,
}

impl<S: RecordStore> EconomyService<S> {
    /// Create a service over a record store.
    pub fn new(store: S, config: EconomyConfig) -> Self {
        Self {
            store,
            config,
            locks: Mutex::new(BTreeMap::new()),
        }
    }

    /// Access the underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Access the economy configuration.
    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Reconcile and return the current state for a user, creating the
    /// record with starting defaults on first reference.
    ///
    /// Each call advances `last_seen`, so a second call immediately
    /// after the first reconciles zero additional elapsed time.
    pub async fn get_state(&self, user_id: UserId) -> Result<StateView, ServiceError> {
        self.get_state_at(user_id, Utc::now()).await
    }

    /// [`Self::get_state`] against an explicit clock.
    pub async fn get_state_at(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<StateView, ServiceError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let Some(prior) = self.store.get(user_id).await? else {
            let state = UserState::new(user_id, now);
            self.store.create(state.clone()).await?;
            info!(user_id, "created new player record");
            return Ok(StateView::from_state(&state));
        };

        let elapsed = elapsed_seconds(prior.last_seen, now);
        let accrual = reconcile(prior.energy, prior.score, prior.level, elapsed, &self.config);
        let state = UserState {
            score: accrual.score,
            energy: accrual.energy,
            // Clock skew: a stored timestamp in the future stays put.
            last_seen: prior.last_seen.max(now),
            ..prior
        };
        self.store.update(state.clone()).await?;

        debug!(
            user_id,
            elapsed,
            score = state.score,
            energy = state.energy,
            "reconciled offline progress"
        );
        Ok(StateView::from_state(&state))
    }

    /// Overwrite a user's stored snapshot with client-authoritative
    /// values and stamp `last_seen`.
    ///
    /// Idempotent: replaying the same snapshot yields the same stored
    /// state, aside from `last_seen` advancing.
    pub async fn save_state(
        &self,
        user_id: UserId,
        snapshot: SaveSnapshot,
    ) -> Result<(), ServiceError> {
        self.save_state_at(user_id, snapshot, Utc::now()).await
    }

    /// [`Self::save_state`] against an explicit clock.
    pub async fn save_state_at(
        &self,
        user_id: UserId,
        snapshot: SaveSnapshot,
        now: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let prior = self
            .store
            .get(user_id)
            .await?
            .ok_or(ServiceError::UnknownUser(user_id))?;

        let state = apply_save(&prior, snapshot, now);
        self.store.update(state).await?;

        debug!(user_id, score = snapshot.score, "applied client save");
        Ok(())
    }

    /// Fetch (or register) the mutual-exclusion scope for a user id.
    ///
    /// The registry lock is held only for the map touch, never across
    /// store I/O. Entries are retained for the life of the service.
    async fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }
}

/// Build the stored record for a client save.
///
/// The single seam through which client-asserted values reach storage:
/// they are written verbatim today, and any future range checks on
/// score/energy/level belong here, away from the reconciliation path.
fn apply_save(prior: &UserState, snapshot: SaveSnapshot, now: DateTime<Utc>) -> UserState {
    UserState {
        user_id: prior.user_id,
        score: snapshot.score,
        energy: snapshot.energy.unwrap_or(prior.energy),
        level: snapshot.level.unwrap_or(prior.level),
        last_seen: now,
    }
}

/// Seconds between `last_seen` and `now`, clamped to zero when the
/// stored timestamp is in the future.
fn elapsed_seconds(last_seen: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = now.signed_duration_since(last_seen).num_milliseconds();
    millis.max(0) as f64 / 1000.0
}

// =============================================================================
// TESTS
// =============================================================================
