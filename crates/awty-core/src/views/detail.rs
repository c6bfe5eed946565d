//! Single-trip detail view with a click-to-add waypoint popup.

use std::time::{Duration, Instant};

use super::lifecycle::{LoadTicket, ViewLifecycle};
use crate::api::TripApi;
use crate::error::FetchError;
use crate::models::{Coordinate, NewStop, Stop, Trip, TripId, TripRoute};

/// How long a banner stays visible
pub const BANNER_DURATION: Duration = Duration::from_secs(3);

pub const WAYPOINT_ADDED_MESSAGE: &str = "Location added to trip successfully!";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Trip),
    NotFound,
    Failed(String),
}

/// Calculated route for the shown trip; fetched on demand.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteState {
    Idle,
    Loading,
    Loaded(TripRoute),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Timed notice shown above the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Banner {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= BANNER_DURATION
    }
}

#[derive(Debug, Clone)]
pub struct TripDetailView {
    trip_id: TripId,
    state: DetailState,
    marker: Option<Coordinate>,
    waypoint: Option<Coordinate>,
    popup_open: bool,
    banner: Option<Banner>,
    adding: bool,
    route: RouteState,
    /// A stop was added after the route was calculated
    route_outdated: bool,
    lifecycle: ViewLifecycle,
    route_lifecycle: ViewLifecycle,
}

impl TripDetailView {
    pub fn new(trip_id: TripId) -> Self {
        Self {
            trip_id,
            state: DetailState::Loading,
            marker: None,
            waypoint: None,
            popup_open: false,
            banner: None,
            adding: false,
            route: RouteState::Idle,
            route_outdated: false,
            lifecycle: ViewLifecycle::default(),
            route_lifecycle: ViewLifecycle::default(),
        }
    }

    pub const fn trip_id(&self) -> &TripId {
        &self.trip_id
    }

    /// Point the view at another trip. Everything tied to the old trip is
    /// dropped and in-flight loads for it become stale.
    pub fn set_trip_id(&mut self, trip_id: TripId) {
        if trip_id == self.trip_id {
            return;
        }
        let lifecycle = std::mem::take(&mut self.lifecycle);
        let route_lifecycle = std::mem::take(&mut self.route_lifecycle);
        *self = Self::new(trip_id);
        self.lifecycle = lifecycle;
        self.route_lifecycle = route_lifecycle;
        self.lifecycle.begin();
        self.route_lifecycle.begin();
    }

    pub const fn state(&self) -> &DetailState {
        &self.state
    }

    pub const fn trip(&self) -> Option<&Trip> {
        match &self.state {
            DetailState::Loaded(trip) => Some(trip),
            _ => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    pub fn title(&self) -> &str {
        match &self.state {
            DetailState::Loading => "Loading...",
            DetailState::Loaded(trip) => &trip.name,
            DetailState::NotFound => "Trip not found",
            DetailState::Failed(_) => "Could not load trip",
        }
    }

    pub fn body(&self) -> &str {
        match &self.state {
            DetailState::Loading => "Loading description...",
            DetailState::Loaded(trip) => &trip.description,
            DetailState::NotFound => "This trip does not exist or was removed.",
            DetailState::Failed(message) => message,
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.state = DetailState::Loading;
        self.lifecycle.begin()
    }

    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<Trip, FetchError>) -> bool {
        if !self.lifecycle.accepts(ticket) {
            tracing::debug!(trip_id = %self.trip_id, "Discarding stale trip response");
            return false;
        }
        self.state = match result {
            Ok(trip) => {
                self.marker = trip.start_coordinate();
                DetailState::Loaded(trip)
            }
            Err(error) if error.is_not_found() => {
                tracing::info!(trip_id = %self.trip_id, "Trip not found");
                DetailState::NotFound
            }
            Err(error) => {
                tracing::warn!(trip_id = %self.trip_id, "Failed to load trip: {}", error);
                DetailState::Failed(error.user_message())
            }
        };
        true
    }

    pub async fn load<A: TripApi>(&mut self, api: &A) -> bool {
        let ticket = self.begin_load();
        let result = api.get_trip(&self.trip_id).await;
        self.apply_load(ticket, result)
    }

    /// The trip's start location, once loaded.
    pub const fn marker(&self) -> Option<Coordinate> {
        self.marker
    }

    /// The clicked location pending confirmation.
    pub const fn waypoint(&self) -> Option<Coordinate> {
        self.waypoint
    }

    pub const fn popup_open(&self) -> bool {
        self.popup_open
    }

    pub const fn is_adding(&self) -> bool {
        self.adding
    }

    /// Map center: the start marker, or the origin before it is known.
    pub fn map_center(&self) -> Coordinate {
        self.marker.unwrap_or_default()
    }

    pub fn click_map(&mut self, location: Coordinate) {
        if self.trip().is_none() {
            return;
        }
        self.waypoint = Some(location);
        self.popup_open = true;
    }

    pub fn close_popup(&mut self) {
        self.popup_open = false;
        self.waypoint = None;
    }

    /// Build the stop to add for the pending waypoint. `None` when there is
    /// nothing to add or an add is already in flight.
    pub fn begin_add_waypoint(&mut self, description: &str) -> Option<NewStop> {
        if self.adding || !self.popup_open {
            return None;
        }
        let location = self.waypoint?;
        let trip = self.trip()?;
        let stop = NewStop {
            location: location.to_string(),
            description: description.trim().to_string(),
            order: trip.next_stop_order(),
        };
        self.adding = true;
        Some(stop)
    }

    pub fn finish_add_waypoint(&mut self, result: Result<Stop, FetchError>, now: Instant) -> bool {
        self.adding = false;
        match result {
            Ok(stop) => {
                tracing::info!(trip_id = %self.trip_id, order = stop.order, "Added waypoint");
                if let DetailState::Loaded(trip) = &mut self.state {
                    trip.stops.push(stop);
                }
                self.route_outdated = matches!(self.route, RouteState::Loaded(_));
                self.show_banner(BannerKind::Success, WAYPOINT_ADDED_MESSAGE.to_string(), now);
                self.close_popup();
                true
            }
            Err(error) => {
                tracing::warn!(trip_id = %self.trip_id, "Failed to add waypoint: {}", error);
                self.show_banner(BannerKind::Error, error.user_message(), now);
                false
            }
        }
    }

    pub async fn add_waypoint<A: TripApi>(&mut self, api: &A, description: &str) -> bool {
        let Some(stop) = self.begin_add_waypoint(description) else {
            return false;
        };
        let result = api.add_stop(&self.trip_id, &stop).await;
        if !self.lifecycle.is_mounted() {
            return false;
        }
        self.finish_add_waypoint(result, Instant::now())
    }

    pub const fn route(&self) -> &RouteState {
        &self.route
    }

    /// True when stops changed since the shown route was calculated.
    pub const fn route_outdated(&self) -> bool {
        self.route_outdated
    }

    pub fn begin_route_load(&mut self) -> LoadTicket {
        self.route = RouteState::Loading;
        self.route_lifecycle.begin()
    }

    pub fn apply_route(
        &mut self,
        ticket: LoadTicket,
        result: Result<TripRoute, FetchError>,
    ) -> bool {
        if !self.route_lifecycle.accepts(ticket) {
            tracing::debug!(trip_id = %self.trip_id, "Discarding stale route response");
            return false;
        }
        self.route = match result {
            Ok(route) => {
                self.route_outdated = false;
                RouteState::Loaded(route)
            }
            Err(error) => {
                tracing::warn!(trip_id = %self.trip_id, "Failed to load route: {}", error);
                RouteState::Failed(error.user_message())
            }
        };
        true
    }

    pub async fn load_route<A: TripApi>(&mut self, api: &A, recalculate: bool) -> bool {
        let ticket = self.begin_route_load();
        let result = api.get_route(&self.trip_id, recalculate).await;
        self.apply_route(ticket, result)
    }

    fn show_banner(&mut self, kind: BannerKind, message: String, now: Instant) {
        self.banner = Some(Banner {
            kind,
            message,
            shown_at: now,
        });
    }

    /// The banner still visible at `now`.
    pub fn banner(&self, now: Instant) -> Option<&Banner> {
        self.banner.as_ref().filter(|banner| !banner.is_expired(now))
    }

    pub fn clear_expired_banner(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|banner| banner.is_expired(now)) {
            self.banner = None;
        }
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
        self.route_lifecycle.unmount();
    }
}
