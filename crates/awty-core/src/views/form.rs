//! Trip creation form shown as a modal over the trip map.

use thiserror::Error;

use crate::api::TripApi;
use crate::error::FetchError;
use crate::models::{Coordinate, NewTrip, Trip};
use crate::util::normalize_text_option;

/// Client-side required-field failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,
    #[error("Description is required")]
    MissingDescription,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The trip was created; the caller closes the modal and refreshes.
    Created(Trip),
    /// The request failed; the modal stays open showing the error.
    Failed,
    /// Nothing was sent: a required field is empty or a submit is in flight.
    Rejected,
}

/// Modal form state. The start location comes from the map click that
/// opened it and cannot be edited.
#[derive(Debug, Clone, PartialEq)]
pub struct TripForm {
    start_location: Coordinate,
    pub name: String,
    pub description: String,
    pub end_location: String,
    error: Option<String>,
    submitting: bool,
}

impl TripForm {
    pub const fn new(start_location: Coordinate) -> Self {
        Self {
            start_location,
            name: String::new(),
            description: String::new(),
            end_location: String::new(),
            error: None,
            submitting: false,
        }
    }

    pub const fn start_location(&self) -> Coordinate {
        self.start_location
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// True while a create request is in flight; the submit control is
    /// disabled for that time.
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn validate(&self) -> Result<NewTrip, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(FormError::MissingDescription);
        }

        Ok(NewTrip {
            name: name.to_string(),
            description: description.to_string(),
            start_location: self.start_location,
            end_location: normalize_text_option(Some(self.end_location.clone())),
        })
    }

    /// Gate a submission. Returns the payload to send, or `None` when the
    /// form is invalid (the error is shown) or already submitting.
    pub fn begin_submit(&mut self) -> Option<NewTrip> {
        if self.submitting {
            tracing::debug!("Ignoring duplicate trip submission");
            return None;
        }
        match self.validate() {
            Ok(payload) => {
                self.error = None;
                self.submitting = true;
                Some(payload)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                None
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<Trip, FetchError>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(trip) => SubmitOutcome::Created(trip),
            Err(error) => {
                tracing::error!("Failed to create trip: {}", error);
                self.error = Some(error.user_message());
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit<A: TripApi>(&mut self, api: &A) -> SubmitOutcome {
        let Some(payload) = self.begin_submit() else {
            return SubmitOutcome::Rejected;
        };
        let result = api.create_trip(&payload).await;
        self.finish_submit(result)
    }
}
