//! Test doubles for the trip backend.
//!
//! [`spawn_backend`] serves a small in-process axum app that speaks the trip
//! API's wire format; [`ScriptedApi`] is an in-memory [`TripApi`] for view
//! tests that need to count calls or hold responses back.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::api::TripApi;
use crate::auth::{Credentials, MemoryTokenStore};
use crate::error::{Error, FetchError};
use crate::models::{NewStop, NewTrip, Stop, Trip, TripId, TripRoute};
use crate::{AuthSession, ClientConfig, TripApiClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
}

/// Mutable state behind the fake backend.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub trips: Vec<Value>,
    pub users: HashMap<String, String>,
    pub requests: Vec<RecordedRequest>,
    /// Raw status/body served for the next `GET /api/trips`
    pub list_override: Option<(u16, String)>,
    /// Cached routes by trip id
    pub routes: HashMap<String, Value>,
    /// How many times a route was (re)calculated
    pub route_calculations: usize,
    next_id: u64,
}

impl FakeBackend {
    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        self.users
            .insert(username.to_string(), password.to_string());
        self
    }

    /// Seed a stored trip the way the backend would serialize it.
    pub fn with_trip(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.insert_trip(name, "", &format!("{lat}, {lng}"), None);
        self
    }

    fn insert_trip(
        &mut self,
        name: &str,
        description: &str,
        start_location: &str,
        end_location: Option<&str>,
    ) -> Value {
        self.next_id += 1;
        let (lat, lng) = start_location
            .split_once(',')
            .and_then(|(lat, lng)| Some((lat.trim().parse::<f64>().ok()?, lng.trim().parse::<f64>().ok()?)))
            .unwrap_or((0.0, 0.0));
        let created_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap()
            + Duration::seconds(i64::try_from(self.next_id).unwrap());
        let trip = json!({
            "id": self.next_id,
            "user": 1,
            "name": name,
            "description": description,
            "start_location": start_location,
            "start_location_lat": lat,
            "start_location_long": lng,
            "end_location": end_location,
            "created_at": created_at.to_rfc3339(),
            "stops": [],
        });
        self.trips.push(trip.clone());
        trip
    }

    fn record(&mut self, method: &'static str, path: String, headers: &HeaderMap) {
        let authorization = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        self.requests.push(RecordedRequest {
            method,
            path,
            authorization,
        });
    }

    fn find_trip_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.trips
            .iter_mut()
            .find(|trip| trip["id"].to_string() == id)
    }
}

type Shared = Arc<Mutex<FakeBackend>>;

pub struct TestServer {
    pub base_url: String,
    pub state: Shared,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn client_with_store(&self, store: MemoryTokenStore) -> TripApiClient<MemoryTokenStore> {
        let config = ClientConfig::new(&self.base_url).unwrap();
        TripApiClient::new(&config, AuthSession::new(store)).unwrap()
    }

    pub fn client(&self) -> TripApiClient<MemoryTokenStore> {
        self.client_with_store(MemoryTokenStore::with_token("test-token"))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_backend(backend: FakeBackend) -> TestServer {
    let state: Shared = Arc::new(Mutex::new(backend));
    let router = Router::new()
        .route("/api/trips", get(list_trips))
        .route("/api/trips/", post(create_trip))
        .route("/api/trips/{id}", get(get_trip))
        .route("/api/trips/{id}/", delete(delete_trip))
        .route("/api/trips/{id}/add_stop/", post(add_stop))
        .route("/api/trips/{id}/stops/", get(list_stops))
        .route("/api/trips/{id}/route/", get(get_route))
        .route("/api/auth/signup/", post(signup))
        .route("/api/auth/login/", post(login))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve fake backend");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        state,
        handle,
    }
}

/// Base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind unused listener");
    let addr = listener.local_addr().expect("listener addr");
    drop(listener);
    format!("http://{addr}")
}

fn text(status: StatusCode, body: &str) -> Response {
    (status, body.to_string()).into_response()
}

async fn list_trips(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("GET", "/api/trips".to_string(), &headers);
    if let Some((status, body)) = backend.list_override.take() {
        return text(StatusCode::from_u16(status).unwrap(), &body);
    }
    Json(backend.trips.clone()).into_response()
}

async fn create_trip(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("POST", "/api/trips/".to_string(), &headers);
    let name = payload["name"].as_str().unwrap_or_default();
    if name.trim().is_empty() {
        return text(StatusCode::BAD_REQUEST, "name: This field may not be blank.");
    }
    let trip = backend.insert_trip(
        name,
        payload["description"].as_str().unwrap_or_default(),
        payload["start_location"].as_str().unwrap_or_default(),
        payload["end_location"].as_str(),
    );
    (StatusCode::CREATED, Json(trip)).into_response()
}

async fn get_trip(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("GET", format!("/api/trips/{id}"), &headers);
    match backend.find_trip_mut(&id) {
        Some(trip) => Json(trip.clone()).into_response(),
        None => text(StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#),
    }
}

async fn delete_trip(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("DELETE", format!("/api/trips/{id}/"), &headers);
    let before = backend.trips.len();
    backend.trips.retain(|trip| trip["id"].to_string() != id);
    if backend.trips.len() == before {
        text(StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#)
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn add_stop(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("POST", format!("/api/trips/{id}/add_stop/"), &headers);
    let Some(trip) = backend.find_trip_mut(&id) else {
        return text(StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#);
    };
    let stops = trip["stops"].as_array_mut().expect("stops array");
    let stop = json!({
        "id": stops.len() + 1,
        "trip": id,
        "location": payload["location"],
        "description": payload["description"],
        "order": payload["order"],
    });
    stops.push(stop.clone());
    (StatusCode::CREATED, Json(stop)).into_response()
}

async fn list_stops(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("GET", format!("/api/trips/{id}/stops/"), &headers);
    match backend.find_trip_mut(&id) {
        Some(trip) => Json(trip["stops"].clone()).into_response(),
        None => text(StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#),
    }
}

/// Straight-line stand-in for the routing engine: start location, then
/// each stop, 1 km and 60 s per leg.
fn calculate_route(trip: &Value) -> Value {
    let mut points = vec![json!([trip["start_location_long"], trip["start_location_lat"]])];
    for stop in trip["stops"].as_array().into_iter().flatten() {
        if let Some((lat, lng)) = stop["location"].as_str().and_then(|text| text.split_once(',')) {
            if let (Ok(lat), Ok(lng)) = (lat.trim().parse::<f64>(), lng.trim().parse::<f64>()) {
                points.push(json!([lng, lat]));
            }
        }
    }
    let legs = points.len().saturating_sub(1);
    json!({
        "code": "Ok",
        "routes": [{
            "distance": legs as f64 * 1000.0,
            "duration": legs as f64 * 60.0,
            "geometry": {"type": "LineString", "coordinates": points},
        }],
    })
}

async fn get_route(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("GET", format!("/api/trips/{id}/route/"), &headers);
    let Some(trip) = backend.find_trip_mut(&id).map(|trip| trip.clone()) else {
        return text(StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#);
    };
    if !backend.routes.contains_key(&id) || params.contains_key("recalculate") {
        backend.route_calculations += 1;
        backend.routes.insert(id.clone(), calculate_route(&trip));
    }
    let updated_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap()
        + Duration::seconds(i64::try_from(backend.route_calculations).unwrap());
    Json(json!({
        "id": 1,
        "trip": trip["id"],
        "route_data": backend.routes[&id],
        "updated_at": updated_at.to_rfc3339(),
    }))
    .into_response()
}

async fn signup(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("POST", "/api/auth/signup/".to_string(), &headers);
    let username = payload["username"].as_str().unwrap_or_default().to_string();
    let password = payload["password"].as_str().unwrap_or_default().to_string();
    if backend.users.contains_key(&username) {
        return text(StatusCode::BAD_REQUEST, "username taken");
    }
    backend.users.insert(username.clone(), password);
    Json(json!({ "access": format!("access-{username}") })).into_response()
}

async fn login(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    backend.record("POST", "/api/auth/login/".to_string(), &headers);
    let username = payload["username"].as_str().unwrap_or_default();
    let password = payload["password"].as_str().unwrap_or_default();
    if backend.users.get(username).map(String::as_str) == Some(password) {
        Json(json!({
            "access": format!("access-{username}"),
            "refresh": format!("refresh-{username}"),
        }))
        .into_response()
    } else {
        text(
            StatusCode::UNAUTHORIZED,
            "No active account found with the given credentials",
        )
    }
}

pub fn sample_trip(id: &str, name: &str) -> Trip {
    Trip {
        id: id.parse().unwrap(),
        name: name.to_string(),
        description: format!("{name} description"),
        start_location: Some("40, -75".to_string()),
        start_location_lat: Some(40.0),
        start_location_long: Some(-75.0),
        end_location: None,
        created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        stops: Vec::new(),
    }
}

pub fn sample_route(trip_id: &str) -> TripRoute {
    serde_json::from_value(json!({
        "id": 1,
        "trip": trip_id,
        "route_data": {"routes": [{
            "distance": 5000.0,
            "duration": 600.0,
            "geometry": {"coordinates": [[-75.0, 40.0], [-74.0, 41.0]]},
        }]},
        "updated_at": "2024-05-01T12:00:00Z",
    }))
    .unwrap()
}

/// In-memory [`TripApi`] that counts calls and serves queued results.
#[derive(Default)]
pub struct ScriptedApi {
    pub trips: Mutex<Vec<Trip>>,
    pub list_results: Mutex<VecDeque<Result<Vec<Trip>, FetchError>>>,
    pub create_results: Mutex<VecDeque<Result<Trip, FetchError>>>,
    pub stop_results: Mutex<VecDeque<Result<Stop, FetchError>>>,
    pub signup_results: Mutex<VecDeque<Result<String, Error>>>,
    pub route_results: Mutex<VecDeque<Result<TripRoute, FetchError>>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl ScriptedApi {
    pub fn calls(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == name)
            .count()
    }

    fn log(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

impl TripApi for ScriptedApi {
    async fn list_trips(&self) -> Result<Vec<Trip>, FetchError> {
        self.log("list_trips");
        if let Some(result) = self.list_results.lock().unwrap().pop_front() {
            return result;
        }
        Ok(self.trips.lock().unwrap().clone())
    }

    async fn get_trip(&self, id: &TripId) -> Result<Trip, FetchError> {
        self.log("get_trip");
        self.trips
            .lock()
            .unwrap()
            .iter()
            .find(|trip| &trip.id == id)
            .cloned()
            .ok_or_else(|| FetchError::Http {
                status: 404,
                body: r#"{"detail":"Not found."}"#.to_string(),
            })
    }

    async fn create_trip(&self, payload: &NewTrip) -> Result<Trip, FetchError> {
        self.log("create_trip");
        if let Some(result) = self.create_results.lock().unwrap().pop_front() {
            return result;
        }
        let mut trips = self.trips.lock().unwrap();
        let mut trip = sample_trip(&(trips.len() + 1).to_string(), &payload.name);
        trip.description.clone_from(&payload.description);
        trip.start_location = Some(payload.start_location.to_string());
        trip.start_location_lat = Some(payload.start_location.latitude);
        trip.start_location_long = Some(payload.start_location.longitude);
        trip.end_location.clone_from(&payload.end_location);
        trips.push(trip.clone());
        Ok(trip)
    }

    async fn delete_trip(&self, id: &TripId) -> Result<(), FetchError> {
        self.log("delete_trip");
        self.trips.lock().unwrap().retain(|trip| &trip.id != id);
        Ok(())
    }

    async fn add_stop(&self, _id: &TripId, stop: &NewStop) -> Result<Stop, FetchError> {
        self.log("add_stop");
        if let Some(result) = self.stop_results.lock().unwrap().pop_front() {
            return result;
        }
        Ok(Stop {
            id: Some(1),
            location: stop.location.clone(),
            description: stop.description.clone(),
            order: stop.order,
        })
    }

    async fn list_stops(&self, _id: &TripId) -> Result<Vec<Stop>, FetchError> {
        self.log("list_stops");
        Ok(Vec::new())
    }

    async fn get_route(&self, id: &TripId, _recalculate: bool) -> Result<TripRoute, FetchError> {
        self.log("get_route");
        if let Some(result) = self.route_results.lock().unwrap().pop_front() {
            return result;
        }
        Ok(sample_route(id.as_str()))
    }

    async fn signup(&self, credentials: &Credentials) -> Result<String, Error> {
        self.log("signup");
        if let Some(result) = self.signup_results.lock().unwrap().pop_front() {
            return result;
        }
        Ok(format!("access-{}", credentials.username))
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, Error> {
        self.log("login");
        Ok(format!("access-{}", credentials.username))
    }
}
