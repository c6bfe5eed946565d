//! Main application component

use awty_core::views::{AuthMode, Route};
use dioxus::prelude::*;

use crate::components::NavBar;
use crate::services;
use crate::state::AppState;
use crate::theme::ResolvedTheme;
use crate::views::{AuthPage, Home, TripPage, TripsPage};

/// Root application component
#[component]
pub fn App() -> Element {
    let route = use_signal(Route::default);
    let theme = use_signal(ResolvedTheme::from_system);

    // Build the API client once
    let (connected, connect_error) = use_hook(|| match services::connect() {
        Ok(client) => (Some(client), None),
        Err(error) => {
            tracing::error!("Failed to configure trip API client: {}", error);
            (None, Some(error.to_string()))
        }
    });
    let signed_in = use_signal(|| {
        connected
            .as_ref()
            .is_some_and(|client| client.session().is_signed_in())
    });
    let client = use_signal(|| connected);
    let client_error = use_signal(|| connect_error);

    use_context_provider(|| AppState {
        route,
        theme,
        client,
        client_error,
        signed_in,
    });

    let colors = theme().palette();
    let theme_attr = theme().attr();
    let page = match route() {
        Route::Home => rsx! { Home {} },
        Route::Trips => rsx! { TripsPage {} },
        Route::Trip(trip_id) => rsx! { TripPage { trip_id } },
        Route::Signup => rsx! { AuthPage { key: "signup", mode: AuthMode::Signup } },
        Route::Login => rsx! { AuthPage { key: "login", mode: AuthMode::Login } },
    };

    rsx! {
        div {
            class: "app-container",
            "data-theme": "{theme_attr}",
            style: "
                min-height: 100vh;
                font-family: system-ui, -apple-system, sans-serif;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
            ",

            NavBar {}

            if let Some(error) = client_error() {
                div {
                    class: "config-error",
                    style: "
                        margin: 16px 24px 0;
                        padding: 12px 16px;
                        border: 1px solid {colors.error};
                        border-radius: 6px;
                        color: {colors.error};
                    ",
                    "{error}"
                }
            }

            main {
                style: "padding: 24px; max-width: 1100px; margin: 0 auto;",
                {page}
            }
        }
    }
}
