//! Wire Format
//!
//! JSON request/response bodies for the REST surface. Kept separate
//! from the domain types so the wire contract can evolve without
//! touching the service.

use serde::{Deserialize, Serialize};

use crate::player::{StateView, UserId};
use crate::service::SaveSnapshot;

/// Response body for `GET /api/get_score/{user_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// User id the snapshot belongs to.
    pub user_id: UserId,

    /// Accumulated score.
    pub score: u64,

    /// Current energy.
    pub energy: u32,

    /// Current level.
    pub level: u32,

    /// Passive income rate for the current level.
    pub profit_per_hour: u64,

    /// Energy regeneration rate.
    pub energy_per_second: u32,
}

impl From<StateView> for ScoreResponse {
    fn from(view: StateView) -> Self {
        Self {
            user_id: view.user_id,
            score: view.score,
            energy: view.energy,
            level: view.level,
            profit_per_hour: view.profit_per_hour,
            energy_per_second: view.energy_per_second,
        }
    }
}

/// Request body for `POST /api/save_score`.
///
/// `energy` and `level` are optional: older clients submit only
/// `{user_id, score}`, and a missing field preserves the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// User id to save for.
    pub user_id: UserId,

    /// Client-asserted score.
    pub score: u64,

    /// Client-asserted energy, if submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<u32>,

    /// Client-asserted level, if submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

impl SaveRequest {
    /// Extract the snapshot to hand to the service.
    pub fn snapshot(&self) -> SaveSnapshot {
        SaveSnapshot {
            score: self.score,
            energy: self.energy,
            level: self.level,
        }
    }
}

/// Response body for `POST /api/save_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    /// `"ok"` on success.
    pub status: String,
}

impl SaveResponse {
    /// Success acknowledgement.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Error body returned alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `"error"`.
    pub status: String,

    /// Human-readable description.
    pub message: String,
}

impl ErrorResponse {
    /// Build an error body with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_full_body() {
        let json = r#"{"user_id": 42, "score": 500, "energy": 80, "level": 3}"#;
        let request: SaveRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.snapshot(), SaveSnapshot::full(500, 80, 3));
    }

    #[test]
    fn test_save_request_score_only_body() {
        // Body shape the legacy client sends.
        let json = r#"{"user_id": 42, "score": 500}"#;
        let request: SaveRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.snapshot(), SaveSnapshot::score_only(500));
    }

    #[test]
    fn test_score_response_shape() {
        let response = ScoreResponse {
            user_id: 1,
            score: 1050,
            energy: 100,
            level: 2,
            profit_per_hour: 50,
            energy_per_second: 1,
        };
        let json: serde_json::Value = serde_json::to_value(&response).unwrap();

        assert_eq!(json["user_id"], 1);
        assert_eq!(json["score"], 1050);
        assert_eq!(json["profit_per_hour"], 50);
        assert_eq!(json["energy_per_second"], 1);
    }
}
