//! Trip card component

use awty_core::util::compact_text;
use awty_core::Trip;
use dioxus::prelude::*;

use crate::state::AppState;

/// A single trip rendered in the trip list.
#[component]
pub fn TripCard(trip: Trip, onclick: EventHandler<MouseEvent>) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let description = compact_text(&trip.description);
    let created = trip.created_at.format("%b %-d, %Y").to_string();
    let stop_count = trip.stops.len();

    rsx! {
        div {
            class: "trip-card",
            style: "
                border: 1px solid {colors.border};
                border-radius: 8px;
                padding: 14px 16px;
                cursor: pointer;
                background: {colors.bg_primary};
            ",
            onclick: move |evt| onclick.call(evt),

            div {
                class: "trip-name",
                style: "font-weight: 600; font-size: 16px; margin-bottom: 4px; color: {colors.text_primary};",
                "{trip.name}"
            }
            div {
                class: "trip-description",
                style: "color: {colors.text_secondary}; margin-bottom: 8px;",
                "{description}"
            }
            div {
                class: "trip-meta",
                style: "font-size: 12px; color: {colors.text_muted}; display: flex; gap: 12px;",
                span { "Created {created}" }
                if let Some(start) = trip.start_coordinate() {
                    span { "Starts at {start}" }
                }
                if let Some(end) = trip.end_location() {
                    span { "Ends at {end}" }
                }
                if stop_count > 0 {
                    span { "{stop_count} stops" }
                }
            }
        }
    }
}
