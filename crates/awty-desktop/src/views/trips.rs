//! Trips view - map, sorted trip list, and the creation modal

use std::sync::Arc;

use awty_core::views::{ListDisplay, Route, TripListView};
use awty_core::{FetchError, NewTrip, SortKey, SortOrder, TripApi};
use dioxus::prelude::*;

use crate::components::{MapMarker, MapPanel, TripCard, TripFormModal};
use crate::state::AppState;

/// Create the trip, then re-fetch the list if the create succeeded.
pub async fn create_and_refresh<A: TripApi>(
    api: Arc<A>,
    mut view: Signal<TripListView>,
    payload: NewTrip,
) {
    let result = api.create_trip(&payload).await;
    let ticket = view.write().finish_submit(result);
    if let Some(ticket) = ticket {
        let result = api.list_trips().await;
        view.write().apply_refresh(ticket, result);
    }
}

#[component]
pub fn TripsPage() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut view = use_signal(TripListView::new);

    let mut refresh = move || {
        let Some(client) = state.client() else {
            return;
        };
        let ticket = view.write().begin_refresh();
        spawn(async move {
            let result = client.list_trips().await;
            view.write().apply_refresh(ticket, result);
        });
    };

    use_hook(move || refresh());
    use_drop(move || {
        if let Ok(mut view) = view.try_write() {
            view.unmount();
        }
    });

    let list = view.read();
    let display = list.display();
    let sort = list.sort();
    let markers = list
        .marker()
        .map(MapMarker::pick)
        .into_iter()
        .collect::<Vec<_>>();
    let form_open = list.form().is_some();
    drop(list);

    let arrow = |key: SortKey| {
        if sort.key != key {
            ""
        } else if sort.order == SortOrder::Ascending {
            " ▲"
        } else {
            " ▼"
        }
    };
    let name_label = format!("Name{}", arrow(SortKey::Name));
    let created_label = format!("Created{}", arrow(SortKey::CreatedAt));
    let sort_button_style = format!(
        "padding: 4px 10px; border: 1px solid {}; border-radius: 6px; background: {}; color: {}; cursor: pointer;",
        colors.border, colors.bg_primary, colors.text_primary
    );

    rsx! {
        div {
            class: "trips-page",
            style: "display: flex; flex-direction: column; gap: 24px;",

            div {
                class: "jumbotron",
                style: "text-align: center;",
                h1 { style: "margin: 0 0 8px;", "Trips" }
                p { style: "margin: 0; color: {colors.text_secondary};", "Plan and manage your trips with ease!" }
            }

            section {
                h2 { style: "margin: 0 0 12px;", "Map" }
                MapPanel {
                    markers,
                    onpick: move |coordinate| {
                        view.write().select_location(coordinate);
                    },
                }
            }

            section {
                div {
                    style: "display: flex; align-items: center; gap: 8px; margin-bottom: 12px;",
                    h2 { style: "margin: 0; flex: 1;", "Your Trips" }
                    span { style: "color: {colors.text_muted};", "Sort by" }
                    button {
                        style: "{sort_button_style}",
                        onclick: move |_| view.write().sort_by(SortKey::Name),
                        "{name_label}"
                    }
                    button {
                        style: "{sort_button_style}",
                        onclick: move |_| view.write().sort_by(SortKey::CreatedAt),
                        "{created_label}"
                    }
                    button {
                        style: "{sort_button_style}",
                        onclick: move |_| refresh(),
                        "Refresh"
                    }
                }

                {match display {
                    ListDisplay::Loading => rsx! {
                        p { style: "color: {colors.text_muted};", "Loading trips..." }
                    },
                    ListDisplay::NoTrips => rsx! {
                        div {
                            class: "empty-state",
                            style: "padding: 24px; text-align: center; color: {colors.text_muted}; border: 1px dashed {colors.border}; border-radius: 8px;",
                            "No trips yet. Click the map to plan your first one."
                        }
                    },
                    ListDisplay::Failed(message) => rsx! {
                        div {
                            class: "alert",
                            role: "alert",
                            style: "padding: 12px 16px; border: 1px solid {colors.error}; border-radius: 6px; color: {colors.error};",
                            "{message}"
                        }
                    },
                    ListDisplay::Trips(trips) => rsx! {
                        div {
                            class: "trip-list",
                            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 12px;",
                            for trip in trips {
                                {
                                    let trip_id = trip.id.clone();
                                    rsx! {
                                        TripCard {
                                            key: "{trip_id}",
                                            trip,
                                            onclick: move |_| state.navigate(Route::Trip(trip_id.clone())),
                                        }
                                    }
                                }
                            }
                        }
                    },
                }}
            }

            if form_open {
                TripFormModal {
                    view,
                    on_submit: move |payload: NewTrip| match state.client() {
                        Some(client) => {
                            spawn(create_and_refresh(client, view, payload));
                        }
                        None => {
                            let unavailable = FetchError::Network("Trip API is not configured".to_string());
                            view.write().finish_submit(Err(unavailable));
                        }
                    },
                }
            }
        }
    }
}
