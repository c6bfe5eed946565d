//! Awty Desktop Application
//!
//! Plan trips on a map: pick a start point, name the trip, add waypoints.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod components;
mod services;
mod state;
mod theme;
mod views;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

/// Log targets enabled at `info` unless `RUST_LOG` says otherwise
const LOG_DIRECTIVES: [&str; 2] = ["awty_desktop=info", "awty_core=info"];

fn with_default_directives(filter: EnvFilter) -> EnvFilter {
    LOG_DIRECTIVES
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(filter, EnvFilter::add_directive)
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(with_default_directives(EnvFilter::from_default_env()))
        .init();

    tracing::info!("Starting Awty...");

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Are We There Yet?")
            .with_inner_size(LogicalSize::new(1100.0, 800.0)),
    );

    dioxus::LaunchBuilder::new()
        .with_cfg(config)
        .launch(app::App);
}
