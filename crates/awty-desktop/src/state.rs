//! Application state shared through the Dioxus context.

use std::sync::Arc;

use awty_core::views::Route;
use dioxus::prelude::*;

use crate::services::DesktopClient;
use crate::theme::ResolvedTheme;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Page currently shown
    pub route: Signal<Route>,
    pub theme: Signal<ResolvedTheme>,
    /// Trip API client; `None` when the API URL could not be configured
    pub client: Signal<Option<Arc<DesktopClient>>>,
    /// Why the client is unavailable, for display
    pub client_error: Signal<Option<String>>,
    /// Whether a token is stored
    pub signed_in: Signal<bool>,
}

impl AppState {
    pub fn client(&self) -> Option<Arc<DesktopClient>> {
        (self.client)()
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(%route, "Navigating");
        self.route.set(route);
    }

    pub fn sign_out(&mut self) {
        if let Some(client) = self.client() {
            if let Err(error) = client.session().clear() {
                tracing::error!("Failed to clear stored token: {}", error);
            }
        }
        self.signed_in.set(false);
        self.navigate(Route::Home);
    }
}
