//! Trip list view: fetch, sort, and the map-click-to-create flow.

use super::form::{SubmitOutcome, TripForm};
use super::lifecycle::{LoadTicket, ViewLifecycle};
use crate::api::TripApi;
use crate::error::FetchError;
use crate::models::{sort_trips, Coordinate, NewTrip, SortKey, SortSpec, Trip};

/// Fetch state of the held collection
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Trip>),
    /// Loading stopped on an error; the message is shown inline.
    Failed(String),
}

/// What the list area should render right now
#[derive(Debug, Clone, PartialEq)]
pub enum ListDisplay {
    Loading,
    /// Loaded, but the user has no trips yet
    NoTrips,
    Trips(Vec<Trip>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct TripListView {
    state: ListState,
    sort: SortSpec,
    marker: Option<Coordinate>,
    form: Option<TripForm>,
    lifecycle: ViewLifecycle,
}

impl Default for TripListView {
    fn default() -> Self {
        Self::new()
    }
}

impl TripListView {
    pub fn new() -> Self {
        Self {
            state: ListState::Loading,
            sort: SortSpec::default(),
            marker: None,
            form: None,
            lifecycle: ViewLifecycle::default(),
        }
    }

    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// The held collection in server order.
    pub fn trips(&self) -> &[Trip] {
        match &self.state {
            ListState::Loaded(trips) => trips,
            ListState::Loading | ListState::Failed(_) => &[],
        }
    }

    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Select a sort key; picking the active key again flips the order.
    pub fn sort_by(&mut self, key: SortKey) {
        if self.sort.key == key {
            self.sort.order = self.sort.order.flipped();
        } else {
            self.sort.key = key;
        }
    }

    /// Derive the render state, sorting a copy of the held trips.
    pub fn display(&self) -> ListDisplay {
        match &self.state {
            ListState::Loading => ListDisplay::Loading,
            ListState::Failed(message) => ListDisplay::Failed(message.clone()),
            ListState::Loaded(trips) if trips.is_empty() => ListDisplay::NoTrips,
            ListState::Loaded(trips) => ListDisplay::Trips(sort_trips(trips, self.sort)),
        }
    }

    pub fn begin_refresh(&mut self) -> LoadTicket {
        self.state = ListState::Loading;
        self.lifecycle.begin()
    }

    /// Replace the held collection wholesale. Returns `false` when the
    /// result was stale or the view is gone.
    pub fn apply_refresh(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Trip>, FetchError>,
    ) -> bool {
        if !self.lifecycle.accepts(ticket) {
            tracing::debug!("Discarding stale trip list response");
            return false;
        }
        self.state = match result {
            Ok(trips) => {
                tracing::debug!("Loaded {} trips", trips.len());
                ListState::Loaded(trips)
            }
            Err(error) => {
                tracing::warn!("Failed to load trips: {}", error);
                ListState::Failed(error.user_message())
            }
        };
        true
    }

    pub async fn refresh<A: TripApi>(&mut self, api: &A) -> bool {
        let ticket = self.begin_refresh();
        let result = api.list_trips().await;
        self.apply_refresh(ticket, result)
    }

    pub const fn marker(&self) -> Option<Coordinate> {
        self.marker
    }

    pub const fn form(&self) -> Option<&TripForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TripForm> {
        self.form.as_mut()
    }

    /// Drop a marker at `location` and open the creation form for it.
    ///
    /// Ignored while a form is already open, since its start location is
    /// fixed.
    pub fn select_location(&mut self, location: Coordinate) -> bool {
        if self.form.is_some() {
            return false;
        }
        self.marker = Some(location);
        self.form = Some(TripForm::new(location));
        true
    }

    /// Close the form (cancel or after success) and clear the marker.
    pub fn close_form(&mut self) {
        self.form = None;
        self.marker = None;
    }

    /// Post-creation callback: close the form and start the re-fetch.
    pub fn on_trip_created(&mut self, trip: &Trip) -> LoadTicket {
        tracing::info!(trip_id = %trip.id, "Trip created, refreshing list");
        self.close_form();
        self.begin_refresh()
    }

    /// Gate a submission of the open form. `None` when no form is open, a
    /// field is missing or a submit is already in flight.
    pub fn begin_submit(&mut self) -> Option<NewTrip> {
        self.form.as_mut()?.begin_submit()
    }

    /// Hand the create result to the form. On success the form closes and a
    /// refresh starts; the returned ticket belongs to that refresh.
    pub fn finish_submit(&mut self, result: Result<Trip, FetchError>) -> Option<LoadTicket> {
        match self.form.as_mut()?.finish_submit(result) {
            SubmitOutcome::Created(trip) => Some(self.on_trip_created(&trip)),
            SubmitOutcome::Failed | SubmitOutcome::Rejected => None,
        }
    }

    /// Submit the open form; on success close it and re-fetch the list.
    pub async fn submit_form<A: TripApi>(&mut self, api: &A) -> SubmitOutcome {
        let Some(payload) = self.begin_submit() else {
            return SubmitOutcome::Rejected;
        };
        let result = api.create_trip(&payload).await;
        let outcome = match &result {
            Ok(trip) => SubmitOutcome::Created(trip.clone()),
            Err(_) => SubmitOutcome::Failed,
        };
        if let Some(ticket) = self.finish_submit(result) {
            let refreshed = api.list_trips().await;
            self.apply_refresh(ticket, refreshed);
        }
        outcome
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
    }
}
