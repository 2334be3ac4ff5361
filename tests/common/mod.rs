// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stub booking API for integration tests.
//!
//! An axum router bound to an ephemeral local port. Users, events and
//! bookings live in memory; tokens are HS256 JWTs. Every request is
//! counted per route, and a route can be told to fail or stall its next call.

#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use dashmap::DashMap;
use event_booking_client::config::Config;
use event_booking_client::services::BackendClient;
use event_booking_client::session::SessionStore;
use event_booking_client::storage::{CredentialStore, MemoryCredentialStore};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const SIGNING_KEY: &[u8] = b"test_jwt_key_32_bytes_minimum!!";

#[derive(Debug, Clone)]
pub struct StubUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

impl StubUser {
    fn to_json(&self) -> Value {
        json!({
            "_id": self.id,
            "name": self.name,
            "email": self.email,
            "isAdmin": self.is_admin,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

#[derive(Default)]
pub struct StubState {
    /// Users keyed by email
    users: DashMap<String, StubUser>,
    events: Mutex<Vec<Value>>,
    /// (user id, booking json)
    bookings: Mutex<Vec<(String, Value)>>,
    hits: DashMap<&'static str, usize>,
    failures: DashMap<&'static str, (StatusCode, Value)>,
    delays: DashMap<&'static str, Duration>,
    login_override: Mutex<Option<Value>>,
    next_id: AtomicUsize,
}

impl StubState {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn add_user(&self, name: &str, email: &str, password: &str, is_admin: bool) -> StubUser {
        let user = StubUser {
            id: self.next_id("u"),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            is_admin,
        };
        self.users.insert(email.to_string(), user.clone());
        user
    }

    pub fn add_event(&self, event: Value) {
        self.events.lock().unwrap().push(event);
    }

    pub fn add_booking(&self, user_id: &str, booking: Value) {
        self.bookings
            .lock()
            .unwrap()
            .push((user_id.to_string(), booking));
    }

    /// Status of a booking as the server sees it.
    pub fn booking_status(&self, booking_id: &str) -> Option<String> {
        self.bookings
            .lock()
            .unwrap()
            .iter()
            .find(|(_, b)| b["_id"] == booking_id)
            .and_then(|(_, b)| b["status"].as_str().map(str::to_string))
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Number of requests served for a route key such as `"GET /api/users/me"`.
    pub fn hits(&self, route: &str) -> usize {
        self.hits.get(route).map(|h| *h).unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.iter().map(|h| *h.value()).sum()
    }

    /// Make the next call to `route` fail with `status` and `body`.
    pub fn fail_next(&self, route: &'static str, status: StatusCode, body: Value) {
        self.failures.insert(route, (status, body));
    }

    /// Hold the next call to `route` for `delay` before answering.
    pub fn delay_next(&self, route: &'static str, delay: Duration) {
        self.delays.insert(route, delay);
    }

    /// Answer every login with a fixed body.
    pub fn override_login(&self, body: Value) {
        *self.login_override.lock().unwrap() = Some(body);
    }

    pub fn token_for(&self, user: &StubUser) -> String {
        issue_token(&user.id, 3600)
    }

    async fn enter(&self, route: &'static str) -> Option<Response> {
        *self.hits.entry(route).or_insert(0) += 1;
        if let Some((_, delay)) = self.delays.remove(route) {
            tokio::time::sleep(delay).await;
        }
        self.failures
            .remove(route)
            .map(|(_, (status, body))| (status, Json(body)).into_response())
    }

    fn user_by_id(&self, id: &str) -> Option<StubUser> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.value().clone())
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<StubUser, Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| unauthorized("No token, authorization denied"))?;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(SIGNING_KEY),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| unauthorized("Token is not valid"))?;

        self.user_by_id(&data.claims.sub)
            .ok_or_else(|| unauthorized("Token is not valid"))
    }
}

/// Create a signed token for a user ID, valid for `ttl_secs` (may be negative).
pub fn issue_token(user_id: &str, ttl_secs: i64) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now as usize,
        exp: (now + ttl_secs).max(0) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SIGNING_KEY),
    )
    .unwrap()
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
}

macro_rules! enter {
    ($state:expr, $route:literal) => {
        if let Some(failure) = $state.enter($route).await {
            return failure;
        }
    };
}

macro_rules! authed {
    ($state:expr, $headers:expr) => {
        match $state.authenticate(&$headers) {
            Ok(user) => user,
            Err(response) => return response,
        }
    };
}

async fn me(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    enter!(state, "GET /api/users/me");
    let user = authed!(state, headers);
    Json(user.to_json()).into_response()
}

async fn login(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    enter!(state, "POST /api/users/login");
    if let Some(fixed) = state.login_override.lock().unwrap().clone() {
        return Json(fixed).into_response();
    }

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match state.users.get(email).map(|u| u.value().clone()) {
        Some(user) if user.password == password => Json(json!({
            "token": state.token_for(&user),
            "user": user.to_json(),
        }))
        .into_response(),
        _ => bad_request("Invalid credentials"),
    }
}

async fn register(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    enter!(state, "POST /api/users/register");
    let name = body["name"].as_str().unwrap_or_default();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if state.users.contains_key(email) {
        return bad_request("User already exists");
    }
    let user = state.add_user(name, email, password, false);
    (
        StatusCode::CREATED,
        Json(json!({
            "token": state.token_for(&user),
            "user": user.to_json(),
        })),
    )
        .into_response()
}

async fn make_admin(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    enter!(state, "POST /api/users/make-admin");
    let user = authed!(state, headers);
    let promoted = {
        let mut entry = state.users.get_mut(&user.email).unwrap();
        entry.is_admin = true;
        entry.value().clone()
    };
    Json(json!({
        "user": promoted.to_json(),
        "message": "User is now an admin",
    }))
    .into_response()
}

async fn list_events(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    enter!(state, "GET /api/events");
    authed!(state, headers);
    Json(Value::Array(state.events.lock().unwrap().clone())).into_response()
}

async fn get_event(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    enter!(state, "GET /api/events/:id");
    authed!(state, headers);
    let events = state.events.lock().unwrap();
    match events.iter().find(|e| e["_id"] == id.as_str()) {
        Some(event) => Json(event.clone()).into_response(),
        None => not_found("Event not found"),
    }
}

async fn create_event(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    enter!(state, "POST /api/events");
    let user = authed!(state, headers);
    if !user.is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "message": "Admin access required" })),
        )
            .into_response();
    }
    if body["title"].as_str().unwrap_or_default().is_empty() {
        return bad_request("Title is required");
    }

    let mut event = body.clone();
    event["_id"] = json!(state.next_id("e"));
    state.add_event(event.clone());
    (StatusCode::CREATED, Json(event)).into_response()
}

async fn user_bookings(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    enter!(state, "GET /api/bookings/user");
    let user = authed!(state, headers);
    let bookings: Vec<Value> = state
        .bookings
        .lock()
        .unwrap()
        .iter()
        .filter(|(owner, _)| *owner == user.id)
        .map(|(_, b)| b.clone())
        .collect();
    Json(bookings).into_response()
}

async fn create_booking(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    enter!(state, "POST /api/bookings");
    let user = authed!(state, headers);
    let event_id = body["eventId"].as_str().unwrap_or_default().to_string();

    let event = state
        .events
        .lock()
        .unwrap()
        .iter()
        .find(|e| e["_id"] == event_id.as_str())
        .cloned();
    let Some(event) = event else {
        return not_found("Event not found");
    };

    let booking = json!({
        "_id": state.next_id("b"),
        "event": event,
        "status": "Booked",
    });
    state.add_booking(&user.id, booking.clone());
    (StatusCode::CREATED, Json(booking)).into_response()
}

async fn cancel_booking(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    enter!(state, "DELETE /api/bookings/:id");
    let user = authed!(state, headers);
    let mut bookings = state.bookings.lock().unwrap();
    match bookings
        .iter_mut()
        .find(|(owner, b)| *owner == user.id && b["_id"] == id.as_str())
    {
        Some((_, booking)) => {
            booking["status"] = json!("Canceled");
            Json(json!({ "message": "Booking canceled" })).into_response()
        }
        None => not_found("Booking not found"),
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/users/me", get(me))
        .route("/api/users/login", post(login))
        .route("/api/users/register", post(register))
        .route("/api/users/make-admin", post(make_admin))
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", get(get_event))
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/user", get(user_bookings))
        .route("/api/bookings/{id}", delete(cancel_booking))
        .with_state(state)
}

/// Running stub server.
pub struct StubBackend {
    pub url: String,
    pub state: Arc<StubState>,
}

impl StubBackend {
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub backend");
        let addr = listener.local_addr().unwrap();

        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            api_url: self.url.clone(),
            ..Config::test_default()
        }
    }

    pub fn client(&self) -> BackendClient {
        BackendClient::new(self.url.clone(), Duration::from_secs(5)).unwrap()
    }

    /// Session store over this backend with the given credential store.
    pub fn session(&self, store: Arc<dyn CredentialStore>) -> Arc<SessionStore> {
        Arc::new(SessionStore::new(self.client(), store))
    }
}

/// Backend with one user, and a bootstrapped session logged in as them.
pub async fn logged_in(
    is_admin: bool,
) -> (StubBackend, StubUser, Arc<SessionStore>, Arc<MemoryCredentialStore>) {
    let backend = StubBackend::start().await;
    let user = backend
        .state
        .add_user("Ann", "ann@example.com", "pw", is_admin);

    let store = Arc::new(MemoryCredentialStore::with_credential(
        &backend.state.token_for(&user),
    ));
    let session = backend.session(store.clone());
    session.bootstrap().await;
    assert!(session.is_authenticated(), "stub login should succeed");

    (backend, user, session, store)
}

/// Standard event JSON.
pub fn event_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": format!("{} description", title),
        "date": "2026-03-01T19:30:00.000Z",
        "price": 10,
    })
}
