//! Trip detail view - trip header, map with start marker, add-waypoint popup

use std::time::Instant;

use awty_core::views::{DetailState, RouteState, TripDetailView, BANNER_DURATION};
use awty_core::{TripApi, TripId};
use dioxus::prelude::*;

use crate::components::{MapMarker, MapPanel, NoticeBanner};
use crate::state::AppState;

fn load_trip(state: AppState, mut view: Signal<TripDetailView>) {
    let Some(client) = state.client() else {
        return;
    };
    let ticket = view.write().begin_load();
    let trip_id = view.peek().trip_id().clone();
    spawn(async move {
        let result = client.get_trip(&trip_id).await;
        view.write().apply_load(ticket, result);
    });
}

fn load_route(state: AppState, mut view: Signal<TripDetailView>, recalculate: bool) {
    let Some(client) = state.client() else {
        return;
    };
    let ticket = view.write().begin_route_load();
    let trip_id = view.peek().trip_id().clone();
    spawn(async move {
        let result = client.get_route(&trip_id, recalculate).await;
        view.write().apply_route(ticket, result);
    });
}

#[component]
pub fn TripPage(trip_id: TripId) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut view = use_signal(|| TripDetailView::new(trip_id.clone()));
    let mut stop_description = use_signal(String::new);

    // Load on mount and again whenever the route points at another trip
    use_effect(use_reactive!(|(trip_id,)| {
        if view.peek().trip_id() != &trip_id {
            view.write().set_trip_id(trip_id);
            stop_description.set(String::new());
        }
        load_trip(state, view);
    }));
    use_drop(move || {
        if let Ok(mut view) = view.try_write() {
            view.unmount();
        }
    });

    let add_to_trip = move |_| {
        let Some(client) = state.client() else {
            return;
        };
        let Some(stop) = view.write().begin_add_waypoint(&stop_description.read()) else {
            return;
        };
        let trip_id = view.read().trip_id().clone();
        spawn(async move {
            let result = client.add_stop(&trip_id, &stop).await;
            if view.write().finish_add_waypoint(result, Instant::now()) {
                stop_description.set(String::new());
            }
            tokio::time::sleep(BANNER_DURATION).await;
            view.write().clear_expired_banner(Instant::now());
        });
    };

    let detail = view.read();
    let title = detail.title().to_string();
    let body = detail.body().to_string();
    let loading = detail.is_loading();
    let center = detail.map_center();
    let banner = detail.banner(Instant::now()).cloned();
    let popup = detail.popup_open().then(|| detail.waypoint()).flatten();
    let adding = detail.is_adding();
    let show_map = matches!(detail.state(), DetailState::Loaded(_));
    let stops = detail
        .trip()
        .map(|trip| trip.stops.clone())
        .unwrap_or_default();
    let route_loading = matches!(detail.route(), RouteState::Loading);
    let route_loaded = matches!(detail.route(), RouteState::Loaded(_));
    let route_outdated = detail.route_outdated();
    let route_status = match detail.route() {
        RouteState::Idle => None,
        RouteState::Loading => Some("Calculating route...".to_string()),
        RouteState::Loaded(route) => Some(format!(
            "{} (calculated {})",
            route
                .summary()
                .unwrap_or_else(|| "No distance reported".to_string()),
            route.updated_at.format("%b %-d, %Y %H:%M")
        )),
        RouteState::Failed(message) => Some(message.clone()),
    };
    let mut markers: Vec<MapMarker> = match detail.route() {
        RouteState::Loaded(route) => route.path().into_iter().map(MapMarker::route).collect(),
        _ => Vec::new(),
    };
    markers.extend(
        detail
            .marker()
            .map(|start| MapMarker::start(start).with_label(format!("Start: {start}"))),
    );
    if let Some(waypoint) = popup {
        markers.push(MapMarker::pick(waypoint));
    }
    drop(detail);

    rsx! {
        div {
            class: "trip-page",
            style: "display: flex; flex-direction: column; gap: 20px;",

            div {
                class: "jumbotron",
                style: "text-align: center;",
                h1 { style: "margin: 0 0 8px;", "{title}" }
                p { style: "margin: 0; color: {colors.text_secondary};", "{body}" }
            }

            if let Some(banner) = banner {
                NoticeBanner { kind: banner.kind, message: banner.message }
            }

            if loading {
                p { style: "color: {colors.text_muted};", "Loading trip details..." }
            } else if show_map {
                section {
                    h3 { style: "margin: 0 0 12px;", "Map" }
                    MapPanel {
                        markers,
                        center: Some(center),
                        onpick: move |coordinate| view.write().click_map(coordinate),
                    }
                }

                section {
                    class: "route",
                    style: "display: flex; align-items: center; gap: 8px;",
                    h3 { style: "margin: 0;", "Route" }
                    span {
                        style: "flex: 1; color: {colors.text_secondary};",
                        if let Some(status) = route_status {
                            "{status}"
                        }
                        if route_outdated {
                            " Stops changed since this route was calculated."
                        }
                    }
                    button {
                        style: "padding: 6px 14px; border: 1px solid {colors.border}; border-radius: 6px; background: none; color: {colors.text_primary}; cursor: pointer;",
                        disabled: route_loading,
                        onclick: move |_| load_route(state, view, route_loaded),
                        if route_loaded { "Recalculate" } else { "Show Route" }
                    }
                }

                if let Some(waypoint) = popup {
                    div {
                        class: "popup",
                        style: "
                            display: flex;
                            align-items: center;
                            gap: 8px;
                            padding: 12px 16px;
                            border: 1px solid {colors.border};
                            border-radius: 8px;
                            background: {colors.bg_secondary};
                        ",
                        span { style: "flex: 1;", "{waypoint}" }
                        input {
                            style: "padding: 6px 8px; border: 1px solid {colors.border}; border-radius: 6px; background: {colors.bg_primary}; color: {colors.text_primary};",
                            placeholder: "Description (optional)",
                            value: "{stop_description}",
                            disabled: adding,
                            oninput: move |evt| stop_description.set(evt.value()),
                        }
                        button {
                            style: "padding: 6px 14px; border: none; border-radius: 6px; background: {colors.accent}; color: {colors.accent_text}; cursor: pointer;",
                            disabled: adding,
                            onclick: add_to_trip,
                            "Add to Trip"
                        }
                        button {
                            style: "padding: 6px 14px; border: 1px solid {colors.border}; border-radius: 6px; background: none; color: {colors.text_primary}; cursor: pointer;",
                            disabled: adding,
                            onclick: move |_| view.write().close_popup(),
                            "Close"
                        }
                    }
                }

                if !stops.is_empty() {
                    section {
                        h3 { style: "margin: 0 0 8px;", "Stops" }
                        ol {
                            style: "margin: 0; padding-left: 20px;",
                            for stop in stops {
                                li {
                                    key: "{stop.order}-{stop.location}",
                                    "{stop.location}"
                                    if !stop.description.is_empty() {
                                        span { style: "color: {colors.text_secondary};", " - {stop.description}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
