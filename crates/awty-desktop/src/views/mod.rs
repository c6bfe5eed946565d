//! Application views (pages)

mod auth;
mod home;
mod trip;
mod trips;

pub use auth::AuthPage;
pub use home::Home;
pub use trip::TripPage;
pub use trips::TripsPage;
