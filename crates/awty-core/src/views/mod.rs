//! Headless view state for the Awty front ends.
//!
//! Each view owns its fetched data and loading/error flags. Async work is
//! split into `begin_*` (take a [`LoadTicket`]) and `apply_*`/`finish_*`
//! (hand the result back) so a UI can run the request on its own executor;
//! the `async` helpers do both in one call for simple callers.

pub mod auth;
pub mod detail;
pub mod form;
mod lifecycle;
pub mod list;

use std::fmt;

pub use auth::{AuthForm, AuthMode, AuthOutcome};
pub use detail::{
    Banner, BannerKind, DetailState, RouteState, TripDetailView, BANNER_DURATION,
    WAYPOINT_ADDED_MESSAGE,
};
pub use form::{FormError, SubmitOutcome, TripForm};
pub use lifecycle::{LoadTicket, ViewLifecycle};
pub use list::{ListDisplay, ListState, TripListView};

use crate::models::TripId;

/// Navigation targets between views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Trips,
    Trip(TripId),
    Login,
    Signup,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Trips => f.write_str("/trips"),
            Self::Trip(id) => write!(f, "/trips/{id}"),
            Self::Login => f.write_str("/login"),
            Self::Signup => f.write_str("/signup"),
        }
    }
}
