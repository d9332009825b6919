//! Backend commands queued from UI to the backend worker.

use shared::domain::{Rating, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    SignIn {
        username: String,
        password: String,
    },
    SignUp {
        username: String,
        email: String,
        password: String,
    },
    SubmitFeedback {
        comment: String,
        rating: Rating,
    },
    /// `generation` is echoed back with the response so superseded
    /// snapshots can be discarded.
    FetchAdminSnapshot {
        generation: u64,
    },
    DeleteUser {
        user_id: UserId,
        generation: u64,
    },
    SignOut,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SignIn { .. } => "sign_in",
            BackendCommand::SignUp { .. } => "sign_up",
            BackendCommand::SubmitFeedback { .. } => "submit_feedback",
            BackendCommand::FetchAdminSnapshot { .. } => "fetch_admin_snapshot",
            BackendCommand::DeleteUser { .. } => "delete_user",
            BackendCommand::SignOut => "sign_out",
        }
    }
}
