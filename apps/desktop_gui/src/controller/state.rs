//! The view-state machine.
//!
//! One explicit [`AppState`] value owns everything the presentation layer
//! reads: the active view, the session, form buffers, the sentiment modal,
//! the admin snapshot, and the in-flight guards. [`AppState::apply`] is the
//! only way to transition. It is a pure function of the current state and
//! one [`AppEvent`] and returns the backend effects to dispatch, so the
//! whole navigation table is testable without a backend or a render pass.

use shared::domain::{AdminSnapshot, Rating, SentimentResult, Session, UserId};
use zeroize::Zeroize;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorContext, UiEvent};

/// The single currently-rendered top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SignIn,
    SignUp,
    Feedback,
    AdminDashboard,
    AdminSettings,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Dashboard,
    Settings,
}

#[derive(Debug, Clone, Default)]
pub struct SigninForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct FeedbackForm {
    pub comment: String,
    pub rating: Rating,
}

impl Default for FeedbackForm {
    fn default() -> Self {
        Self {
            comment: String::new(),
            rating: Rating::Excellent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// User intents plus backend completions, all funneled through
/// [`AppState::apply`].
#[derive(Debug)]
pub enum AppEvent {
    GoToSignUp,
    GoToSignIn,
    SubmitSignIn,
    SubmitSignUp,
    SubmitFeedback,
    DismissSentiment,
    DismissNotice,
    SelectAdminTab(AdminTab),
    RetryAdminFetch,
    RequestDeleteUser(UserId),
    ConfirmPendingDelete,
    CancelPendingDelete,
    SignOut,
    Backend(UiEvent),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    Dispatch(BackendCommand),
}

pub struct AppState {
    pub view: View,
    pub session: Option<Session>,
    pub signin: SigninForm,
    pub signup: SignupForm,
    pub feedback: FeedbackForm,
    pub sentiment_modal: Option<SentimentResult>,
    pub admin_snapshot: Option<AdminSnapshot>,
    pub pending_delete: Option<UserId>,
    pub notice: Option<Notice>,
    pub auth_in_flight: bool,
    pub feedback_in_flight: bool,
    pub admin_in_flight: bool,
    /// Generation of the most recently issued snapshot request. Responses
    /// carrying any other generation are superseded and discarded.
    snapshot_generation: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: View::SignIn,
            session: None,
            signin: SigninForm::default(),
            signup: SignupForm::default(),
            feedback: FeedbackForm::default(),
            sentiment_modal: None,
            admin_snapshot: None,
            pending_delete: None,
            notice: None,
            auth_in_flight: false,
            feedback_in_flight: false,
            admin_in_flight: false,
            snapshot_generation: 0,
        }
    }

    fn is_admin_session(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }

    fn next_snapshot_generation(&mut self) -> u64 {
        self.snapshot_generation += 1;
        self.snapshot_generation
    }

    fn wipe_passwords(&mut self) {
        self.signin.password.zeroize();
        self.signup.password.zeroize();
    }

    /// What the render pass should actually show. Admin views are only
    /// renderable with an admin session and a fetched snapshot; until the
    /// first snapshot arrives the placeholder is shown instead of a
    /// dashboard with absent data.
    pub fn visible_view(&self) -> View {
        match self.view {
            View::AdminDashboard | View::AdminSettings => {
                if !self.is_admin_session() {
                    View::SignIn
                } else if self.admin_snapshot.is_some() {
                    self.view
                } else {
                    View::Loading
                }
            }
            view => view,
        }
    }

    pub fn apply(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::GoToSignUp => {
                if self.view == View::SignIn {
                    self.view = View::SignUp;
                    self.notice = None;
                }
                Vec::new()
            }
            AppEvent::GoToSignIn => {
                if self.view == View::SignUp {
                    self.view = View::SignIn;
                    self.notice = None;
                }
                Vec::new()
            }
            AppEvent::SubmitSignIn => {
                if self.auth_in_flight {
                    return Vec::new();
                }
                let username = self.signin.username.trim().to_string();
                if username.is_empty() || self.signin.password.is_empty() {
                    self.notice = Some(Notice::error("Enter a username and password."));
                    return Vec::new();
                }
                self.auth_in_flight = true;
                self.notice = None;
                vec![Effect::Dispatch(BackendCommand::SignIn {
                    username,
                    password: self.signin.password.clone(),
                })]
            }
            AppEvent::SubmitSignUp => {
                if self.auth_in_flight {
                    return Vec::new();
                }
                let username = self.signup.username.trim().to_string();
                let email = self.signup.email.trim().to_string();
                if username.is_empty() || email.is_empty() || self.signup.password.is_empty() {
                    self.notice =
                        Some(Notice::error("Username, email and password are required."));
                    return Vec::new();
                }
                self.auth_in_flight = true;
                self.notice = None;
                vec![Effect::Dispatch(BackendCommand::SignUp {
                    username,
                    email,
                    password: self.signup.password.clone(),
                })]
            }
            AppEvent::SubmitFeedback => {
                if self.feedback_in_flight || self.session.is_none() {
                    return Vec::new();
                }
                let comment = self.feedback.comment.trim().to_string();
                if comment.is_empty() {
                    self.notice = Some(Notice::error("Write a few words before submitting."));
                    return Vec::new();
                }
                self.feedback_in_flight = true;
                self.notice = None;
                vec![Effect::Dispatch(BackendCommand::SubmitFeedback {
                    comment,
                    rating: self.feedback.rating,
                })]
            }
            AppEvent::DismissSentiment => {
                self.sentiment_modal = None;
                Vec::new()
            }
            AppEvent::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
            AppEvent::SelectAdminTab(tab) => {
                if self.is_admin_session()
                    && matches!(self.view, View::AdminDashboard | View::AdminSettings)
                {
                    self.view = match tab {
                        AdminTab::Dashboard => View::AdminDashboard,
                        AdminTab::Settings => View::AdminSettings,
                    };
                }
                Vec::new()
            }
            AppEvent::RetryAdminFetch => {
                // Only meaningful from the loading placeholder, after the
                // initial snapshot fetch failed.
                if self.is_admin_session()
                    && matches!(self.view, View::AdminDashboard | View::AdminSettings)
                    && self.admin_snapshot.is_none()
                    && !self.admin_in_flight
                {
                    self.notice = None;
                    self.admin_in_flight = true;
                    let generation = self.next_snapshot_generation();
                    vec![Effect::Dispatch(BackendCommand::FetchAdminSnapshot {
                        generation,
                    })]
                } else {
                    Vec::new()
                }
            }
            AppEvent::RequestDeleteUser(user_id) => {
                if self.view == View::AdminSettings
                    && self.is_admin_session()
                    && !self.admin_in_flight
                {
                    self.pending_delete = Some(user_id);
                }
                Vec::new()
            }
            AppEvent::ConfirmPendingDelete => {
                if self.admin_in_flight {
                    return Vec::new();
                }
                match self.pending_delete.take() {
                    Some(user_id) => {
                        self.admin_in_flight = true;
                        let generation = self.next_snapshot_generation();
                        vec![Effect::Dispatch(BackendCommand::DeleteUser {
                            user_id,
                            generation,
                        })]
                    }
                    None => Vec::new(),
                }
            }
            AppEvent::CancelPendingDelete => {
                self.pending_delete = None;
                Vec::new()
            }
            AppEvent::SignOut => {
                self.session = None;
                self.wipe_passwords();
                self.signin.username.clear();
                self.feedback = FeedbackForm::default();
                self.sentiment_modal = None;
                self.admin_snapshot = None;
                self.pending_delete = None;
                self.notice = None;
                self.view = View::SignIn;
                vec![Effect::Dispatch(BackendCommand::SignOut)]
            }
            AppEvent::Backend(event) => self.apply_backend(event),
        }
    }

    fn apply_backend(&mut self, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::SignedIn(session) => {
                self.auth_in_flight = false;
                self.wipe_passwords();
                self.notice = None;
                let mut effects = Vec::new();
                if session.is_admin() {
                    self.view = View::AdminDashboard;
                    self.admin_snapshot = None;
                    self.admin_in_flight = true;
                    let generation = self.next_snapshot_generation();
                    effects.push(Effect::Dispatch(BackendCommand::FetchAdminSnapshot {
                        generation,
                    }));
                } else {
                    self.view = View::Feedback;
                }
                self.session = Some(session);
                effects
            }
            UiEvent::SignUpComplete => {
                self.auth_in_flight = false;
                self.view = View::SignIn;
                // Only the credentials clear; the email field stays put.
                self.signup.username.clear();
                self.signup.password.zeroize();
                self.notice = Some(Notice::info("Account Created! Please Sign In."));
                Vec::new()
            }
            UiEvent::SentimentReady(result) => {
                self.feedback_in_flight = false;
                self.sentiment_modal = Some(result);
                Vec::new()
            }
            UiEvent::AdminSnapshotLoaded {
                generation,
                snapshot,
            } => {
                if generation != self.snapshot_generation {
                    tracing::debug!(
                        generation,
                        latest = self.snapshot_generation,
                        "discarding superseded admin snapshot"
                    );
                    return Vec::new();
                }
                self.admin_in_flight = false;
                self.admin_snapshot = Some(snapshot);
                Vec::new()
            }
            UiEvent::Error(err) => {
                tracing::warn!(
                    category = ?err.category(),
                    context = ?err.context(),
                    "backend operation failed"
                );
                match err.context() {
                    UiErrorContext::SignIn | UiErrorContext::SignUp => {
                        self.auth_in_flight = false;
                    }
                    UiErrorContext::Feedback => self.feedback_in_flight = false,
                    UiErrorContext::AdminFetch | UiErrorContext::DeleteUser => {
                        self.admin_in_flight = false;
                    }
                    UiErrorContext::Startup => {}
                }
                self.notice = Some(Notice::error(err.message()));
                Vec::new()
            }
        }
    }
}
