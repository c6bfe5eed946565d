//! UI Components
//!
//! Reusable UI components for the desktop application.

mod banner;
mod map_panel;
mod nav_bar;
mod trip_card;
mod trip_form;

pub use banner::NoticeBanner;
pub use map_panel::{MapMarker, MapPanel};
pub use nav_bar::NavBar;
pub use trip_card::TripCard;
pub use trip_form::{request_submit, TripFormModal};
