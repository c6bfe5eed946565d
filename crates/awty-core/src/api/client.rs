//! HTTP client for the trip API.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::TripApi;
use crate::auth::{AuthSession, Credentials, TokenStore};
use crate::config::ClientConfig;
use crate::error::{Error, FetchError};
use crate::models::{NewStop, NewTrip, Stop, Trip, TripId, TripRoute};
use crate::util::compact_text;

/// Trip API client bound to one base URL and one [`AuthSession`].
#[derive(Debug, Clone)]
pub struct TripApiClient<S: TokenStore> {
    base_url: String,
    client: reqwest::Client,
    session: AuthSession<S>,
}

impl<S: TokenStore> TripApiClient<S> {
    pub fn new(config: &ClientConfig, session: AuthSession<S>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| Error::Config(format!("Failed to construct HTTP client: {error}")))?;

        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
            session,
        })
    }

    pub const fn session(&self) -> &AuthSession<S> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    fn trip_url(&self, id: &TripId, suffix: &str) -> String {
        self.url(&format!("/trips/{}{suffix}", urlencoding::encode(id.as_str())))
    }

    /// Attach the bearer token when there is one. A missing or unreadable
    /// token still sends the request; the server decides.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(error) => {
                tracing::warn!("Failed to read session token: {}", error);
                request
            }
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, FetchError> {
        let response = ensure_success(request.send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn exchange_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<String, Error> {
        credentials.validate()?;

        let request = self.client.post(self.url(path)).json(credentials);
        let response: TokenResponse = self.send_json(request).await?;
        let token = response.access.trim().to_string();
        if token.is_empty() {
            return Err(
                FetchError::Parse("response did not include an access token".to_string()).into(),
            );
        }

        self.session.replace(&token)?;
        tracing::info!(username = %credentials.username, "Stored new session token");
        Ok(token)
    }
}

impl<S: TokenStore> TripApi for TripApiClient<S> {
    async fn list_trips(&self) -> Result<Vec<Trip>, FetchError> {
        tracing::debug!("Fetching trip list");
        let request = self.authorized(self.client.get(self.url("/trips")));
        self.send_json(request).await
    }

    async fn get_trip(&self, id: &TripId) -> Result<Trip, FetchError> {
        tracing::debug!(trip_id = %id, "Fetching trip");
        let request = self.authorized(self.client.get(self.trip_url(id, "")));
        self.send_json(request).await
    }

    async fn create_trip(&self, payload: &NewTrip) -> Result<Trip, FetchError> {
        let request = self.authorized(self.client.post(self.url("/trips/")).json(payload));
        let trip: Trip = self.send_json(request).await?;
        tracing::info!(trip_id = %trip.id, "Created trip");
        Ok(trip)
    }

    async fn delete_trip(&self, id: &TripId) -> Result<(), FetchError> {
        let request = self.authorized(self.client.delete(self.trip_url(id, "/")));
        ensure_success(request.send().await?).await?;
        tracing::info!(trip_id = %id, "Deleted trip");
        Ok(())
    }

    async fn add_stop(&self, id: &TripId, stop: &NewStop) -> Result<Stop, FetchError> {
        let request = self.authorized(
            self.client
                .post(self.trip_url(id, "/add_stop/"))
                .json(stop),
        );
        let created: Stop = self.send_json(request).await?;
        tracing::info!(trip_id = %id, order = created.order, "Added stop to trip");
        Ok(created)
    }

    async fn list_stops(&self, id: &TripId) -> Result<Vec<Stop>, FetchError> {
        let request = self.authorized(self.client.get(self.trip_url(id, "/stops/")));
        self.send_json(request).await
    }

    async fn get_route(&self, id: &TripId, recalculate: bool) -> Result<TripRoute, FetchError> {
        tracing::debug!(trip_id = %id, recalculate, "Fetching trip route");
        let mut url = self.trip_url(id, "/route/");
        if recalculate {
            url.push_str("?recalculate=true");
        }
        let request = self.authorized(self.client.get(url));
        self.send_json(request).await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<String, Error> {
        self.exchange_credentials("/auth/signup/", credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, Error> {
        self.exchange_credentials("/auth/login/", credentials).await
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: String,
}

async fn ensure_success(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(
        status = status.as_u16(),
        body = %compact_text(&body),
        "Trip API request failed"
    );
    Err(FetchError::Http {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::auth::MemoryTokenStore;
    use crate::models::Coordinate;
    use crate::test_support::{spawn_backend, unreachable_base_url, FakeBackend};

    fn new_trip(name: &str) -> NewTrip {
        NewTrip {
            name: name.to_string(),
            description: "Along the coast".to_string(),
            start_location: Coordinate::new(40.0, -75.0).unwrap(),
            end_location: Some("Cape May".to_string()),
        }
    }

    #[tokio::test]
    async fn list_trips_sends_bearer_token() {
        let server = spawn_backend(FakeBackend::default().with_trip("Shore", 40.0, -75.0)).await;
        let client = server.client();

        let trips = client.list_trips().await.unwrap();

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].name, "Shore");
        let requests = server.requests();
        assert_eq!(requests[0].path, "/api/trips");
        assert_eq!(
            requests[0].authorization.as_deref(),
            Some("Bearer test-token")
        );
    }

    #[tokio::test]
    async fn list_trips_without_token_still_sends_request() {
        let server = spawn_backend(FakeBackend::default()).await;
        let client = server.client_with_store(MemoryTokenStore::default());

        let trips = client.list_trips().await.unwrap();

        assert!(trips.is_empty());
        assert_eq!(server.requests()[0].authorization, None);
    }

    #[tokio::test]
    async fn non_success_status_becomes_http_error_with_body() {
        let mut backend = FakeBackend::default();
        backend.list_override = Some((401, "Authentication credentials were not provided.".to_string()));
        let server = spawn_backend(backend).await;

        let error = server.client().list_trips().await.unwrap_err();

        assert_eq!(
            error,
            FetchError::Http {
                status: 401,
                body: "Authentication credentials were not provided.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn malformed_json_becomes_parse_error() {
        let mut backend = FakeBackend::default();
        backend.list_override = Some((200, "[{\"id\": 1, \"name\":".to_string()));
        let server = spawn_backend(backend).await;

        let error = server.client().list_trips().await.unwrap_err();

        assert!(matches!(error, FetchError::Parse(_)), "got {error:?}");
    }

    #[tokio::test]
    async fn unreachable_server_becomes_network_error() {
        let config = ClientConfig::new(unreachable_base_url().await).unwrap();
        let client =
            TripApiClient::new(&config, AuthSession::new(MemoryTokenStore::default())).unwrap();

        let error = client.list_trips().await.unwrap_err();

        assert!(matches!(error, FetchError::Network(_)), "got {error:?}");
    }

    #[tokio::test]
    async fn get_trip_missing_is_not_found() {
        let server = spawn_backend(FakeBackend::default()).await;

        let error = server
            .client()
            .get_trip(&"99".parse().unwrap())
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn create_trip_posts_payload_and_returns_trip() {
        let server = spawn_backend(FakeBackend::default()).await;
        let client = server.client();

        let created = client.create_trip(&new_trip("Coast")).await.unwrap();

        assert_eq!(created.name, "Coast");
        assert_eq!(created.end_location(), Some("Cape May"));
        assert_eq!(
            created.start_coordinate(),
            Some(Coordinate::new(40.0, -75.0).unwrap())
        );
        assert_eq!(server.count("POST", "/api/trips/"), 1);
        let stored = server.state.lock().unwrap().trips[0].clone();
        assert_eq!(stored["start_location"], "40, -75");
    }

    #[tokio::test]
    async fn add_and_list_stops_round_trip_through_trip() {
        let server = spawn_backend(FakeBackend::default().with_trip("Loop", 1.0, 2.0)).await;
        let client = server.client();
        let id: TripId = "1".parse().unwrap();

        let stop = client
            .add_stop(
                &id,
                &NewStop {
                    location: "3, 4".to_string(),
                    description: "Lunch".to_string(),
                    order: 1,
                },
            )
            .await
            .unwrap();
        let stops = client.list_stops(&id).await.unwrap();

        assert_eq!(stop.location, "3, 4");
        assert_eq!(stops, vec![stop]);
        assert_eq!(server.count("POST", "/api/trips/1/add_stop/"), 1);
    }

    #[tokio::test]
    async fn delete_trip_removes_it() {
        let server = spawn_backend(FakeBackend::default().with_trip("Gone", 1.0, 2.0)).await;
        let client = server.client();

        client.delete_trip(&"1".parse().unwrap()).await.unwrap();

        assert!(client.list_trips().await.unwrap().is_empty());
        assert_eq!(server.count("DELETE", "/api/trips/1/"), 1);
    }

    #[tokio::test]
    async fn route_is_cached_until_recalculate_is_requested() {
        let server = spawn_backend(FakeBackend::default().with_trip("Loop", 40.0, -75.0)).await;
        let client = server.client();
        let id: TripId = "1".parse().unwrap();

        let first = client.get_route(&id, false).await.unwrap();
        client
            .add_stop(
                &id,
                &NewStop {
                    location: "41, -74".to_string(),
                    description: String::new(),
                    order: 1,
                },
            )
            .await
            .unwrap();
        let cached = client.get_route(&id, false).await.unwrap();
        let fresh = client.get_route(&id, true).await.unwrap();

        assert_eq!(first.trip, id);
        assert_eq!(cached.path(), first.path());
        assert_eq!(
            fresh.path(),
            vec![
                Coordinate::new(40.0, -75.0).unwrap(),
                Coordinate::new(41.0, -74.0).unwrap(),
            ]
        );
        assert_eq!(fresh.distance_meters(), Some(1000.0));
        assert_eq!(server.state.lock().unwrap().route_calculations, 2);
        assert_eq!(server.count("GET", "/api/trips/1/route/"), 3);
    }

    #[tokio::test]
    async fn route_for_missing_trip_is_not_found() {
        let server = spawn_backend(FakeBackend::default()).await;

        let error = server
            .client()
            .get_route(&"5".parse().unwrap(), false)
            .await
            .unwrap_err();

        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn signup_overwrites_session_token() {
        let server = spawn_backend(FakeBackend::default()).await;
        let store = MemoryTokenStore::with_token("old-token");
        let client = server.client_with_store(store.clone());

        let token = client
            .signup(&Credentials::new("amy", "pw"))
            .await
            .unwrap();

        assert_eq!(token, "access-amy");
        assert_eq!(store.load_token().unwrap().as_deref(), Some("access-amy"));
        assert_eq!(server.requests()[0].authorization, None);
    }

    #[tokio::test]
    async fn failed_signup_keeps_token_and_surfaces_body() {
        let server = spawn_backend(FakeBackend::default().with_user("amy", "pw")).await;
        let store = MemoryTokenStore::with_token("old-token");
        let client = server.client_with_store(store.clone());

        let error = client
            .signup(&Credentials::new("amy", "other"))
            .await
            .unwrap_err();

        match error {
            Error::Fetch(fetch) => assert_eq!(fetch.user_message(), "username taken"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.load_token().unwrap().as_deref(), Some("old-token"));
    }

    #[tokio::test]
    async fn login_stores_access_token_only() {
        let server = spawn_backend(FakeBackend::default().with_user("amy", "pw")).await;
        let store = MemoryTokenStore::default();
        let client = server.client_with_store(store.clone());

        client.login(&Credentials::new("amy", "pw")).await.unwrap();

        assert_eq!(store.load_token().unwrap().as_deref(), Some("access-amy"));
    }

    #[tokio::test]
    async fn empty_credentials_never_reach_the_server() {
        let server = spawn_backend(FakeBackend::default()).await;

        let error = server
            .client()
            .signup(&Credentials::new("", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::InvalidInput(_)));
        assert!(server.requests().is_empty());
    }
}
