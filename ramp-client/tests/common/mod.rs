// ramp-client/tests/common/mod.rs
// In-process stub of the RAMP auth and resource APIs

#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ramp_client::ClientConfig;
use ramp_client::csrf::find_cookie;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const SESSION_COOKIE: &str = "access_token_ramp";
pub const SESSION_VALUE: &str = "jwt-sato";
pub const CSRF_VALUE: &str = "csrf-7f3a9c";

/// Log lines written by the client while a [`capture_logs`] guard is alive
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's `ramp_client` events into a buffer
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("ramp_client=debug"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

pub const LOGOUT_OK: u8 = 0;
pub const LOGOUT_SERVER_ERROR: u8 = 1;

/// One request as the stub saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub csrf_header: Option<String>,
}

#[derive(Clone, Default)]
pub struct StubState {
    recorded: Arc<Mutex<Vec<Recorded>>>,
    logout_mode: Arc<AtomicU8>,
    revoked: Arc<AtomicBool>,
}

pub struct Stub {
    pub addr: SocketAddr,
    pub state: StubState,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Stub {
    pub async fn spawn() -> Self {
        let state = StubState::default();
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .unwrap();
        });
        Self {
            addr,
            state,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn api_root(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.api_root()).with_timeout(Duration::from_secs(5))
    }

    /// Stop serving; later calls fail at the transport level
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.state.recorded.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.recorded().into_iter().filter(|r| r.path == path).collect()
    }

    pub fn set_logout_mode(&self, mode: u8) {
        self.state.logout_mode.store(mode, Ordering::SeqCst);
    }

    /// Server-side session invalidation
    pub fn revoke_sessions(&self) {
        self.state.revoked.store(true, Ordering::SeqCst);
    }
}

fn router(state: StubState) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/check", get(check))
        .route("/api/auth/system_logs", get(system_logs))
        .route("/api/users/{id}/pii", get(user_pii))
        .route("/api/plans/", post(create_plan))
        .route("/api/plans/{id}/goal", post(add_goal))
        .route("/api/plans/{id}/activate", post(activate_plan))
        .route("/api/slow", get(slow))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<StubState>, req: Request, next: Next) -> Response {
    let csrf_header = req
        .headers()
        .get("x-csrf-token")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.recorded.lock().unwrap().push(Recorded {
        method: req.method().clone(),
        path: req.uri().path().to_string(),
        csrf_header,
    });
    next.run(req).await
}

fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    find_cookie(raw, name)
}

fn msg(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "msg": text }))).into_response()
}

/// Session cookie check, as the JWT layer would do it
fn authorize(state: &StubState, headers: &HeaderMap) -> Result<(), Response> {
    if cookie(headers, SESSION_COOKIE).as_deref() != Some(SESSION_VALUE) {
        return Err(msg(StatusCode::UNAUTHORIZED, "Missing cookie \"access_token_ramp\""));
    }
    if state.revoked.load(Ordering::SeqCst) {
        return Err(msg(StatusCode::UNAUTHORIZED, "Token has been revoked"));
    }
    Ok(())
}

/// Double-submit check on mutating routes
fn authorize_mutation(state: &StubState, headers: &HeaderMap) -> Result<(), Response> {
    authorize(state, headers)?;
    let header = headers.get("x-csrf-token").and_then(|v| v.to_str().ok());
    let cookie = cookie(headers, "csrf_access_token");
    match (header, cookie) {
        (Some(h), Some(c)) if h == c => Ok(()),
        (None, _) => Err(msg(StatusCode::UNAUTHORIZED, "Missing CSRF token")),
        _ => Err(msg(StatusCode::UNAUTHORIZED, "CSRF double submit tokens do not match")),
    }
}

fn sato() -> Value {
    json!({
        "msg": "ok",
        "supporter_id": 1,
        "role_id": 1,
        "full_name": "佐藤",
        "role_name": "管理者"
    })
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(Json(body): Json<LoginBody>) -> Response {
    if body.email.is_empty() || body.password.is_empty() {
        return msg(StatusCode::BAD_REQUEST, "メールアドレスとパスワードを入力してください。");
    }
    match (body.email.as_str(), body.password.as_str()) {
        ("sato@ramp.co.jp", "adminpassword") => (
            StatusCode::OK,
            AppendHeaders([
                (
                    header::SET_COOKIE,
                    format!("{}={}; HttpOnly; Path=/", SESSION_COOKIE, SESSION_VALUE),
                ),
                (
                    header::SET_COOKIE,
                    format!("csrf_access_token={}; Path=/", CSRF_VALUE),
                ),
            ]),
            Json(sato()),
        )
            .into_response(),
        ("legacy@ramp.co.jp", _) => Json(json!({
            "msg": "ok",
            "supporter_id": 4,
            "role_id": 1,
            "full_name": "管理者 太郎"
        }))
        .into_response(),
        ("slow@ramp.co.jp", _) => {
            tokio::time::sleep(Duration::from_millis(300)).await;
            msg(StatusCode::UNAUTHORIZED, "認証情報が無効です。")
        }
        _ => msg(StatusCode::UNAUTHORIZED, "認証情報が無効です。"),
    }
}

async fn logout(State(state): State<StubState>) -> Response {
    match state.logout_mode.load(Ordering::SeqCst) {
        LOGOUT_SERVER_ERROR => msg(StatusCode::INTERNAL_SERVER_ERROR, "logout failed"),
        _ => (
            StatusCode::OK,
            AppendHeaders([
                (
                    header::SET_COOKIE,
                    format!("{}=; Max-Age=0; Path=/", SESSION_COOKIE),
                ),
                (
                    header::SET_COOKIE,
                    "csrf_access_token=; Max-Age=0; Path=/".to_string(),
                ),
            ]),
            Json(json!({ "msg": "ログアウトしました" })),
        )
            .into_response(),
    }
}

async fn check(State(state): State<StubState>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(sato()).into_response()
}

pub fn pii_payload() -> Value {
    json!({
        "id": 1,
        "display_name": "田中 太郎",
        "pii": {
            "last_name": "田中",
            "first_name": "太郎",
            "last_name_kana": "タナカ",
            "first_name_kana": "タロウ",
            "address": "東京都千代田区1-1",
            "phone_number": "090-1234-5678",
            "email": "tanaka@example.jp",
            "birth_date": "1990-04-01",
            "certificate_number": null
        }
    })
}

async fn user_pii(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    match id {
        1 => Json(pii_payload()).into_response(),
        3 => Json(json!({
            "id": 3,
            "display_name": "匿名 利用者",
            "msg": "No PII record found"
        }))
        .into_response(),
        2 => msg(StatusCode::FORBIDDEN, "forbidden"),
        _ => msg(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn create_plan(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize_mutation(&state, &headers) {
        return resp;
    }
    if body.get("user_id").is_none() || body.get("holistic_support_policy_id").is_none() {
        return msg(
            StatusCode::BAD_REQUEST,
            "Missing user_id or holistic_support_policy_id",
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "plan_id": 10, "status": "DRAFT" })),
    )
        .into_response()
}

async fn add_goal(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(plan_id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize_mutation(&state, &headers) {
        return resp;
    }
    if body.get("concrete_goal").and_then(Value::as_str).unwrap_or_default().is_empty() {
        return msg(StatusCode::BAD_REQUEST, "Missing required goal data");
    }
    (
        StatusCode::CREATED,
        Json(json!({ "goal_id": 100, "plan_id": plan_id })),
    )
        .into_response()
}

async fn activate_plan(
    State(state): State<StubState>,
    headers: HeaderMap,
    Path(plan_id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize_mutation(&state, &headers) {
        return resp;
    }
    Json(json!({
        "msg": "Plan activated successfully",
        "plan_id": plan_id,
        "status": "ACTIVE"
    }))
    .into_response()
}

#[derive(Deserialize)]
struct LogQuery {
    plan_id: Option<i64>,
}

async fn system_logs(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<LogQuery>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let logs = vec![
        json!({
            "id": 2,
            "timestamp": "2025-01-05T10:00:00",
            "action": "PLAN_CREATE",
            "supporter_name": "佐藤 健太",
            "target_user_id": 1,
            "target_plan_id": 10
        }),
        json!({
            "id": 1,
            "timestamp": "2025-01-04T09:30:00",
            "action": "VIEW_PII",
            "supporter_name": "佐藤 健太",
            "target_user_id": 1,
            "target_plan_id": null
        }),
    ];
    let filtered: Vec<Value> = logs
        .into_iter()
        .filter(|l| match query.plan_id {
            Some(id) => l["target_plan_id"] == json!(id),
            None => true,
        })
        .collect();
    Json(filtered).into_response()
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({})).into_response()
}
