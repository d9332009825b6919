use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use shared::{
    domain::{Rating, Role, UserId},
    protocol::{
        AdminSnapshotWire, AdminStatsWire, AuthOutcome, FeedbackRequest, FeedbackResponse,
        ReviewRow, SigninRequest, SignupRequest, UserRow,
    },
    sentiment::SentimentCategory,
};
use tokio::net::TcpListener;

use crate::{ClientError, FeedbackClient};

#[derive(Clone, Default)]
struct MockBackend {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    admin_fetches: AtomicUsize,
    deleted: Mutex<Vec<i64>>,
    users: Mutex<Vec<UserRow>>,
    feedback: Mutex<Vec<FeedbackRequest>>,
}

impl MockBackend {
    fn with_users(users: Vec<UserRow>) -> Self {
        let backend = Self::default();
        *backend.inner.users.lock().expect("users lock") = users;
        backend
    }
}

async fn signin(
    State(state): State<MockBackend>,
    Json(req): Json<SigninRequest>,
) -> (StatusCode, Json<AuthOutcome>) {
    let _ = &state;
    if req.username == "admin" && req.password == "admin123" {
        return (
            StatusCode::OK,
            Json(AuthOutcome {
                status: Some("success".to_string()),
                username: Some("Admin".to_string()),
                role: Some(Role::Admin),
                error: None,
            }),
        );
    }
    if req.password == "secret" {
        return (
            StatusCode::OK,
            Json(AuthOutcome {
                status: Some("success".to_string()),
                username: Some(req.username),
                role: Some(Role::User),
                error: None,
            }),
        );
    }
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthOutcome {
            error: Some("Invalid credentials".to_string()),
            ..AuthOutcome::default()
        }),
    )
}

async fn signup(Json(req): Json<SignupRequest>) -> (StatusCode, Json<AuthOutcome>) {
    if req.username == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(AuthOutcome {
                error: Some("User already exists".to_string()),
                ..AuthOutcome::default()
            }),
        );
    }
    (
        StatusCode::OK,
        Json(AuthOutcome {
            status: Some("success".to_string()),
            ..AuthOutcome::default()
        }),
    )
}

async fn feedback(
    State(state): State<MockBackend>,
    Json(req): Json<FeedbackRequest>,
) -> Json<FeedbackResponse> {
    state
        .inner
        .feedback
        .lock()
        .expect("feedback lock")
        .push(req);
    Json(FeedbackResponse {
        sentiment: "joy".to_string(),
    })
}

async fn admin(State(state): State<MockBackend>) -> Json<AdminSnapshotWire> {
    state.inner.admin_fetches.fetch_add(1, Ordering::SeqCst);
    let users = state.inner.users.lock().expect("users lock").clone();
    Json(AdminSnapshotWire {
        stats: AdminStatsWire {
            total: 3,
            rating: 4.2,
            emotion: "joy".to_string(),
        },
        reviews: vec![ReviewRow(
            1,
            "bob".to_string(),
            "great".to_string(),
            5,
            "joy".to_string(),
        )],
        users,
    })
}

async fn delete_user(
    State(state): State<MockBackend>,
    Path(id): Path<i64>,
) -> StatusCode {
    state.inner.deleted.lock().expect("deleted lock").push(id);
    state
        .inner
        .users
        .lock()
        .expect("users lock")
        .retain(|row| row.0 != id);
    StatusCode::OK
}

async fn spawn_backend(state: MockBackend) -> String {
    let app = Router::new()
        .route("/api/signin", post(signin))
        .route("/api/signup", post(signup))
        .route("/api/feedback", post(feedback))
        .route("/api/admin", get(admin))
        .route("/api/admin/delete/:id", delete(delete_user))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn authenticate_admin_sets_admin_session() {
    let api_root = spawn_backend(MockBackend::default()).await;
    let mut client = FeedbackClient::new(api_root);

    let session = client
        .authenticate("admin", "admin123")
        .await
        .expect("admin sign-in");

    assert_eq!(session.username, "Admin");
    assert_eq!(session.role, Role::Admin);
    assert!(client.session().expect("session").is_admin());
}

#[tokio::test]
async fn authenticate_user_sets_user_session() {
    let api_root = spawn_backend(MockBackend::default()).await;
    let mut client = FeedbackClient::new(api_root);

    let session = client
        .authenticate("alice", "secret")
        .await
        .expect("user sign-in");

    assert_eq!(session.username, "alice");
    assert_eq!(session.role, Role::User);
}

#[tokio::test]
async fn rejected_credentials_surface_server_message() {
    let api_root = spawn_backend(MockBackend::default()).await;
    let mut client = FeedbackClient::new(api_root);

    let err = client
        .authenticate("alice", "wrong")
        .await
        .expect_err("must reject");

    assert!(matches!(err, ClientError::Rejected { .. }));
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(client.session().is_none());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    // Nothing listens here; connect must fail before any HTTP exchange.
    let mut client = FeedbackClient::new("http://127.0.0.1:9/api");

    let err = client
        .authenticate("alice", "secret")
        .await
        .expect_err("must fail");

    assert!(err.is_transport());
    assert_eq!(err.user_message(), "Backend Offline.");
}

#[tokio::test]
async fn register_has_no_session_side_effect() {
    let api_root = spawn_backend(MockBackend::default()).await;
    let client = FeedbackClient::new(api_root);

    client
        .register("bob", "b@x.com", "p")
        .await
        .expect("sign-up");

    assert!(client.session().is_none());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let api_root = spawn_backend(MockBackend::default()).await;
    let client = FeedbackClient::new(api_root);

    let err = client
        .register("taken", "t@x.com", "p")
        .await
        .expect_err("must reject");

    assert_eq!(err.user_message(), "User already exists");
}

#[tokio::test]
async fn feedback_uses_session_username_and_returns_label_verbatim() {
    let backend = MockBackend::default();
    let api_root = spawn_backend(backend.clone()).await;
    let mut client = FeedbackClient::new(api_root);

    client
        .authenticate("alice", "secret")
        .await
        .expect("sign-in");
    let result = client
        .submit_feedback("loved it", Rating::Excellent)
        .await
        .expect("submit");

    assert_eq!(result.label, "joy");
    assert_eq!(result.category(), SentimentCategory::Positive);

    let sent = backend.inner.feedback.lock().expect("feedback lock");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].username, "alice");
    assert_eq!(sent[0].comment, "loved it");
    assert_eq!(sent[0].rating, Rating::Excellent);
}

#[tokio::test]
async fn feedback_without_session_never_reaches_the_wire() {
    let backend = MockBackend::default();
    let api_root = spawn_backend(backend.clone()).await;
    let client = FeedbackClient::new(api_root);

    let err = client
        .submit_feedback("hello", Rating::Average)
        .await
        .expect_err("must fail");

    assert!(matches!(err, ClientError::NotSignedIn));
    assert!(backend.inner.feedback.lock().expect("feedback lock").is_empty());
}

#[tokio::test]
async fn delete_user_refetches_snapshot_exactly_once() {
    let backend = MockBackend::with_users(vec![
        UserRow(1, "bob".to_string(), "x".to_string(), "b@x.com".to_string()),
        UserRow(2, "carol".to_string(), "x".to_string(), "c@x.com".to_string()),
    ]);
    let api_root = spawn_backend(backend.clone()).await;
    let client = FeedbackClient::new(api_root);

    let snapshot = client.delete_user(UserId(1)).await.expect("delete");

    assert_eq!(
        backend.inner.deleted.lock().expect("deleted lock").as_slice(),
        &[1]
    );
    assert_eq!(backend.inner.admin_fetches.load(Ordering::SeqCst), 1);
    assert!(!snapshot.contains_user(UserId(1)));
    assert!(snapshot.contains_user(UserId(2)));
}

#[tokio::test]
async fn sign_out_is_idempotent() {
    let api_root = spawn_backend(MockBackend::default()).await;
    let mut client = FeedbackClient::new(api_root);

    client
        .authenticate("alice", "secret")
        .await
        .expect("sign-in");
    client.sign_out();
    client.sign_out();

    assert!(client.session().is_none());
}
