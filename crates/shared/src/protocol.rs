//! Wire types for the feedback backend's HTTP/JSON API.
//!
//! The `reviews`/`users` payloads are positional arrays on the wire. They
//! are decoded into named records here at the boundary; index-based access
//! must not leak past this module.

use serde::{Deserialize, Serialize};

use crate::domain::{
    AdminSnapshot, AdminStats, FeedbackId, Rating, ReviewRecord, Role, UserId, UserRecord,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Auth endpoints answer `{status:"success", ...}` on success and a non-2xx
/// status with `{error}` on rejection. The `status` field may be absent
/// entirely on the failure path, so every field defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub username: String,
    pub comment: String,
    pub rating: Rating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub sentiment: String,
}

/// `[id, username, comment, rating, sentiment]` as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow(pub i64, pub String, pub String, pub i64, pub String);

/// `[id, username, password, email]`. The third column is the stored
/// password, a backend wart; it is dropped on conversion and never leaves
/// this module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow(pub i64, pub String, pub String, pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStatsWire {
    pub total: i64,
    pub rating: f64,
    pub emotion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSnapshotWire {
    pub stats: AdminStatsWire,
    pub reviews: Vec<ReviewRow>,
    pub users: Vec<UserRow>,
}

impl From<ReviewRow> for ReviewRecord {
    fn from(row: ReviewRow) -> Self {
        let ReviewRow(id, username, comment, rating, sentiment) = row;
        Self {
            id: FeedbackId(id),
            username,
            comment,
            rating,
            sentiment,
        }
    }
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        let UserRow(id, username, _password, email) = row;
        Self {
            id: UserId(id),
            username,
            email,
        }
    }
}

impl From<AdminSnapshotWire> for AdminSnapshot {
    fn from(wire: AdminSnapshotWire) -> Self {
        Self {
            stats: AdminStats {
                total: wire.stats.total,
                avg_rating: wire.stats.rating,
                dominant_emotion: wire.stats.emotion,
            },
            reviews: wire.reviews.into_iter().map(ReviewRecord::from).collect(),
            users: wire.users.into_iter().map(UserRecord::from).collect(),
        }
    }
}
