//! awty-core - Core library for Awty
//!
//! This crate contains the trip models, the REST client for the trip API,
//! the bearer-token session, and the headless view state shared by all Awty
//! front ends (desktop, CLI).

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod util;
pub mod views;

#[cfg(test)]
mod test_support;

pub use api::{TripApi, TripApiClient};
pub use auth::{AuthSession, MemoryTokenStore, TokenStore};
pub use config::ClientConfig;
pub use error::{Error, FetchError, Result};
pub use models::{Coordinate, NewTrip, SortKey, SortOrder, SortSpec, Trip, TripId, TripRoute};
