// crates/backend-lib/tests/login.rs
//! End-to-end tests of the login pipeline, driven through the real router.
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Request, StatusCode,
};
use axum::Router;
use board_backend_lib::auth::{DelegatingHasher, TokenIssuer};
use board_backend_lib::config::Settings;
use board_backend_lib::error::AppError;
use board_backend_lib::member::{Member, NewMember};
use board_backend_lib::router::create_router;
use board_backend_lib::store::{InMemoryMemberStore, MemberStore};
use board_backend_lib::AppState;
use board_common::{LoginSuccess, Role};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

const USERNAME: &str = "username";
const PASSWORD: &str = "123456789";
const TOKEN_SECRET: &str = "test-secret-not-for-production";
const LOGIN_URL: &str = "/login";

fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.token.secret = TOKEN_SECRET.to_string();
    settings
}

async fn seed_member(store: &dyn MemberStore, hasher: &DelegatingHasher) -> Member {
    store
        .save(NewMember {
            username: USERNAME.to_string(),
            password_hash: hasher.hash(PASSWORD).unwrap(),
            name: "Member1".to_string(),
            nickname: "NickName1".to_string(),
            age: 22,
            role: Role::User,
        })
        .await
        .unwrap()
}

async fn app() -> Router {
    app_with_store(Arc::new(InMemoryMemberStore::new())).await
}

async fn app_with_store(store: Arc<dyn MemberStore>) -> Router {
    let state = Arc::new(AppState::new(store.clone(), test_settings()).unwrap());
    seed_member(store.as_ref(), &state.hasher).await;
    create_router(state)
}

fn login_request(username: &str, password: &str, content_type: &str) -> Request<Body> {
    let body = serde_json::to_vec(&json!({
        "username": username,
        "password": password,
    }))
    .unwrap();
    Request::builder()
        .method("POST")
        .uri(LOGIN_URL)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn login_success_returns_token() {
    let app = app().await;

    let response = app
        .oneshot(login_request(USERNAME, PASSWORD, "application/json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: LoginSuccess = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let claims = TokenIssuer::new(TOKEN_SECRET, 3600).decode(&body.token).unwrap();
    assert_eq!(claims.sub, USERNAME);
    assert_eq!(claims.roles, vec![Role::User]);
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let app = app().await;

    let response = app
        .oneshot(login_request(USERNAME, "wrong-password", "application/json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_user_and_bad_password_are_indistinguishable() {
    let app = app().await;

    let unknown = app
        .clone()
        .oneshot(login_request("username123", PASSWORD, "application/json"))
        .await
        .unwrap();
    let wrong = app
        .oneshot(login_request(USERNAME, "wrong-password", "application/json"))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    // Same status and same body; nothing on the wire reveals whether the
    // account exists.
    assert_eq!(body_bytes(unknown).await, body_bytes(wrong).await);
}

#[tokio::test]
async fn missing_fields_are_empty_credentials_not_an_error() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri(LOGIN_URL)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    // Empty credentials go through verification and fail as unknown user.
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app().await;

    let request = Request::builder()
        .method("POST")
        .uri(LOGIN_URL)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("this is not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Store wrapper that counts lookups, to prove short-circuit behavior.
struct CountingStore {
    inner: InMemoryMemberStore,
    lookups: AtomicUsize,
}

impl CountingStore {
    fn new() -> Self {
        Self {
            inner: InMemoryMemberStore::new(),
            lookups: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MemberStore for CountingStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_username(username).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.exists_by_username(username).await
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Member>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, new: NewMember) -> Result<Member, AppError> {
        self.inner.save(new).await
    }

    async fn update(&self, member: Member) -> Result<(), AppError> {
        self.inner.update(member).await
    }

    async fn delete(&self, id: u64) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn wrong_content_type_never_reaches_the_store() {
    let store = Arc::new(CountingStore::new());
    let app = app_with_store(store.clone()).await;

    let response = app
        .oneshot(login_request(
            USERNAME,
            PASSWORD,
            "application/x-www-form-urlencoded",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn content_type_match_is_exact() {
    // A charset parameter disqualifies the request, same as the original
    // filter's equality check.
    let app = app().await;

    let response = app
        .oneshot(login_request(
            USERNAME,
            PASSWORD,
            "application/json; charset=utf-8",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_and_put_on_login_fall_through_to_routing() {
    for method in ["GET", "PUT"] {
        let app = app().await;
        let request = Request::builder()
            .method(method)
            .uri(LOGIN_URL)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::empty())
            .unwrap();

        // /login is public but has no route for these methods.
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "method {method}");
    }
}

#[tokio::test]
async fn login_path_mismatch_is_forbidden() {
    let app = app().await;

    let body = serde_json::to_vec(&json!({"username": USERNAME, "password": PASSWORD})).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/login123")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    // Not the login path, not public: the stateless guard denies it.
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn index_is_public() {
    let app = app().await;

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_path_requires_a_valid_token() {
    let app = app().await;

    // No token: denied before routing.
    let request = Request::builder()
        .uri("/members/me")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Garbage token: still denied.
    let request = Request::builder()
        .uri("/members/me")
        .header(AUTHORIZATION, "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A token freshly minted by a login passes the guard; the path then
    // simply has no route, so routing answers 404 instead of 403.
    let login = app
        .clone()
        .oneshot(login_request(USERNAME, PASSWORD, "application/json"))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let body: LoginSuccess = serde_json::from_slice(&body_bytes(login).await).unwrap();

    let request = Request::builder()
        .uri("/members/me")
        .header(AUTHORIZATION, format!("Bearer {}", body.token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
