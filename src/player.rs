//! Player State
//!
//! The persisted per-player record and the snapshot returned to clients.
//! Records are keyed by the client-supplied integer user id (a Telegram
//! user id when deployed as a web app).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::economy::rates::profit_per_hour;
use crate::{ENERGY_PER_SECOND, MAX_ENERGY};

/// Unique player identifier.
pub type UserId = i64;

/// Persisted state of a single player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    /// Unique user id, immutable once created.
    pub user_id: UserId,

    /// Accumulated score. Whole units only; fractional passive income is
    /// truncated at each reconciliation boundary.
    pub score: u64,

    /// Current energy, kept in `[0, MAX_ENERGY]` by reconciliation.
    pub energy: u32,

    /// Current level (>= 1). Selects the passive income rate. Advanced
    /// only by client saves, never by the server.
    pub level: u32,

    /// Timestamp of the last reconciliation or save; the basis for the
    /// next elapsed-time computation.
    pub last_seen: DateTime<Utc>,
}

impl UserState {
    /// Create a brand-new record with starting defaults: zero score,
    /// full energy, level 1.
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            score: 0,
            energy: MAX_ENERGY,
            level: 1,
            last_seen: now,
        }
    }
}

/// Snapshot returned to the client by `get_state`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateView {
    /// User id this view belongs to.
    pub user_id: UserId,

    /// Accumulated score.
    pub score: u64,

    /// Current energy.
    pub energy: u32,

    /// Current level.
    pub level: u32,

    /// Passive income rate for the current level.
    pub profit_per_hour: u64,

    /// Energy regeneration rate (constant).
    pub energy_per_second: u32,
}

impl StateView {
    /// Build a view from a persisted record.
    pub fn from_state(state: &UserState) -> Self {
        Self {
            user_id: state.user_id,
            score: state.score,
            energy: state.energy,
            level: state.level,
            profit_per_hour: profit_per_hour(state.level),
            energy_per_second: ENERGY_PER_SECOND,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
