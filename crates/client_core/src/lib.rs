//! Async HTTP client for the feedback backend.
//!
//! Owns the active [`Session`]: authentication stores it, sign-out clears
//! it, and feedback submission reads the username from it. Administrative
//! reads always replace the snapshot wholesale; the delete mutation is
//! followed by exactly one re-fetch so the caller never sees a locally
//! edited list.

use reqwest::Client;
use shared::{
    domain::{AdminSnapshot, Rating, Role, SentimentResult, Session, UserId},
    protocol::{
        AdminSnapshotWire, AuthOutcome, FeedbackRequest, FeedbackResponse, SigninRequest,
        SignupRequest,
    },
};
use thiserror::Error;
use tracing::{info, warn};

mod config;
pub use config::{load_settings, normalize_api_root, Settings};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed: backend unreachable, DNS, timeout.
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered and explicitly refused the operation.
    #[error("{message}")]
    Rejected { message: String },
    /// An operation that requires a session was called while signed out.
    #[error("no active session")]
    NotSignedIn,
}

impl ClientError {
    fn rejected(message: Option<String>) -> Self {
        Self::Rejected {
            message: message.unwrap_or_else(|| "Failed".to_string()),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => "Backend Offline.".to_string(),
            ClientError::Rejected { message } => message.clone(),
            ClientError::NotSignedIn => "Sign in to continue.".to_string(),
        }
    }
}

pub struct FeedbackClient {
    http: Client,
    api_root: String,
    session: Option<Session>,
}

impl FeedbackClient {
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_root: normalize_api_root(&api_root.into()),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// POST `/signin`. On success the returned session becomes the active
    /// one; on rejection the previous session (if any) is left untouched.
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let res = self
            .http
            .post(format!("{}/signin", self.api_root))
            .json(&SigninRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let outcome = read_auth_outcome(res).await?;

        if outcome.is_success() {
            let session = Session {
                username: outcome.username.unwrap_or_else(|| username.to_string()),
                role: outcome.role.unwrap_or(Role::User),
            };
            info!(username = %session.username, role = ?session.role, "authenticated");
            self.session = Some(session.clone());
            Ok(session)
        } else {
            warn!(username, "sign-in rejected");
            Err(ClientError::rejected(outcome.error))
        }
    }

    /// POST `/signup`. Never touches the active session; the caller decides
    /// where to navigate afterwards.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let res = self
            .http
            .post(format!("{}/signup", self.api_root))
            .json(&SignupRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let outcome = read_auth_outcome(res).await?;

        if outcome.is_success() {
            info!(username, "account registered");
            Ok(())
        } else {
            warn!(username, "sign-up rejected");
            Err(ClientError::rejected(outcome.error))
        }
    }

    /// Clears the active session. Idempotent.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!(username = %session.username, "signed out");
        }
    }

    /// POST `/feedback` for the signed-in user. The returned label is the
    /// classifier output verbatim.
    pub async fn submit_feedback(
        &self,
        comment: &str,
        rating: Rating,
    ) -> Result<SentimentResult, ClientError> {
        let session = self.session.as_ref().ok_or(ClientError::NotSignedIn)?;
        let res = self
            .http
            .post(format!("{}/feedback", self.api_root))
            .json(&FeedbackRequest {
                username: session.username.clone(),
                comment: comment.to_string(),
                rating,
            })
            .send()
            .await?;
        let res = ensure_success(res)?;
        let body: FeedbackResponse = res.json().await?;
        info!(rating = rating.as_u8(), sentiment = %body.sentiment, "feedback classified");
        Ok(SentimentResult {
            label: body.sentiment,
        })
    }

    /// GET `/admin`. Positional wire rows are converted to named records
    /// before anything else sees them.
    pub async fn fetch_admin_snapshot(&self) -> Result<AdminSnapshot, ClientError> {
        let res = self
            .http
            .get(format!("{}/admin", self.api_root))
            .send()
            .await?;
        let res = ensure_success(res)?;
        let wire: AdminSnapshotWire = res.json().await?;
        let snapshot = AdminSnapshot::from(wire);
        info!(
            total = snapshot.stats.total,
            users = snapshot.users.len(),
            "admin snapshot fetched"
        );
        Ok(snapshot)
    }

    /// DELETE `/admin/delete/{id}`, then one mandatory snapshot re-fetch.
    /// The store of record decides what the caller sees next; no local
    /// list surgery happens here or anywhere upstream.
    pub async fn delete_user(&self, user_id: UserId) -> Result<AdminSnapshot, ClientError> {
        let res = self
            .http
            .delete(format!("{}/admin/delete/{}", self.api_root, user_id.0))
            .send()
            .await?;
        ensure_success(res)?;
        info!(user_id = user_id.0, "user deleted, re-synchronizing snapshot");
        self.fetch_admin_snapshot().await
    }
}

/// Auth endpoints put the rejection reason in the body of a non-2xx
/// response, so the body is decoded regardless of HTTP status. An
/// undecodable body counts as a rejection with no message.
async fn read_auth_outcome(res: reqwest::Response) -> Result<AuthOutcome, ClientError> {
    let bytes = res.bytes().await?;
    Ok(serde_json::from_slice(&bytes).unwrap_or_default())
}

fn ensure_success(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        Err(ClientError::Rejected {
            message: format!("request failed with status {status}"),
        })
    }
}

#[cfg(test)]
mod tests;
