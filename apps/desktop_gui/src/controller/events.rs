//! Backend-to-UI events and error modeling for the desktop controller.

use client_core::ClientError;
use shared::domain::{AdminSnapshot, SentimentResult, Session};

#[derive(Debug, Clone)]
pub enum UiEvent {
    SignedIn(Session),
    SignUpComplete,
    SentimentReady(SentimentResult),
    AdminSnapshotLoaded {
        generation: u64,
        snapshot: AdminSnapshot,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// Request never completed; the user must retry the same action.
    Transport,
    /// Backend answered with an explicit refusal.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Startup,
    SignIn,
    SignUp,
    Feedback,
    AdminFetch,
    DeleteUser,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn from_client(context: UiErrorContext, err: &ClientError) -> Self {
        let category = if err.is_transport() {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Rejected
        };
        Self::new(category, context, err.user_message())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
