//! Data models for Awty

mod coordinate;
mod route;
mod sort;
mod stop;
mod trip;

pub use coordinate::Coordinate;
pub use route::TripRoute;
pub use sort::{sort_trips, SortKey, SortOrder, SortSpec};
pub use stop::{NewStop, Stop};
pub use trip::{NewTrip, Trip, TripId};
