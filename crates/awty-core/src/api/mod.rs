//! Trip API access.
//!
//! [`TripApi`] is the seam the view state is written against;
//! [`TripApiClient`] is the HTTP implementation used by the front ends.

mod client;

pub use client::TripApiClient;

use crate::auth::Credentials;
use crate::error::{Error, FetchError};
use crate::models::{NewStop, NewTrip, Stop, Trip, TripId, TripRoute};

/// Operations the trip backend offers to a signed-in client.
#[allow(async_fn_in_trait)]
pub trait TripApi {
    /// `GET /api/trips`: every trip owned by the current session.
    async fn list_trips(&self) -> Result<Vec<Trip>, FetchError>;

    /// `GET /api/trips/{id}`
    async fn get_trip(&self, id: &TripId) -> Result<Trip, FetchError>;

    /// `POST /api/trips/`
    async fn create_trip(&self, payload: &NewTrip) -> Result<Trip, FetchError>;

    /// `DELETE /api/trips/{id}/`
    async fn delete_trip(&self, id: &TripId) -> Result<(), FetchError>;

    /// `POST /api/trips/{id}/add_stop/`: append a waypoint.
    async fn add_stop(&self, id: &TripId, stop: &NewStop) -> Result<Stop, FetchError>;

    /// `GET /api/trips/{id}/stops/`
    async fn list_stops(&self, id: &TripId) -> Result<Vec<Stop>, FetchError>;

    /// `GET /api/trips/{id}/route/`. The server calculates the route on first
    /// request and caches it; `recalculate` forces a fresh calculation.
    async fn get_route(&self, id: &TripId, recalculate: bool) -> Result<TripRoute, FetchError>;

    /// `POST /api/auth/signup/`. On success the session token is replaced
    /// and the new token returned.
    async fn signup(&self, credentials: &Credentials) -> Result<String, Error>;

    /// `POST /api/auth/login/`. Same contract as [`TripApi::signup`].
    async fn login(&self, credentials: &Credentials) -> Result<String, Error>;
}
