//! Clickable world map pad.
//!
//! The pad is a fixed-size equirectangular projection: y runs from 90 down
//! to -90 degrees of latitude and x covers a full 360 degrees of longitude
//! with the center longitude in the middle column, so a click's element
//! offset maps straight to a coordinate.

use awty_core::Coordinate;
use dioxus::prelude::*;

use crate::state::AppState;

pub const MAP_WIDTH: f64 = 720.0;
pub const MAP_HEIGHT: f64 = 360.0;

/// Meridians/parallels drawn every this many degrees
const GRID_STEP_DEGREES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapProjection {
    center_longitude: f64,
}

impl MapProjection {
    /// Projection with `center`'s longitude in the middle; the prime
    /// meridian when there is no center.
    pub fn centered_on(center: Option<Coordinate>) -> Self {
        Self {
            center_longitude: center.map_or(0.0, |center| center.longitude),
        }
    }

    /// Convert an offset inside the pad to a coordinate. `None` outside the pad.
    pub fn coordinate_at(self, x: f64, y: f64) -> Option<Coordinate> {
        if !(0.0..=MAP_WIDTH).contains(&x) || !(0.0..=MAP_HEIGHT).contains(&y) {
            return None;
        }
        let longitude =
            round_degrees(wrap_longitude(x * 360.0 / MAP_WIDTH - 180.0 + self.center_longitude));
        let latitude = round_degrees(90.0 - y * 180.0 / MAP_HEIGHT);
        Coordinate::new(latitude, longitude).ok()
    }

    /// Pixel offset of `coordinate` inside the pad.
    pub fn position_of(self, coordinate: Coordinate) -> (f64, f64) {
        let y = (90.0 - coordinate.latitude) * MAP_HEIGHT / 180.0;
        (self.x_of(coordinate.longitude), y)
    }

    fn x_of(self, longitude: f64) -> f64 {
        (wrap_longitude(longitude - self.center_longitude) + 180.0) * MAP_WIDTH / 360.0
    }
}

/// Fold a longitude that ran past the antimeridian back into [-180, 180].
fn wrap_longitude(value: f64) -> f64 {
    if value > 180.0 {
        value - 360.0
    } else if value < -180.0 {
        value + 360.0
    } else {
        value
    }
}

/// Keep four decimals (about 11 m), which is plenty for a click.
fn round_degrees(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// A trip's start location
    Start,
    /// A location the user just picked
    Pick,
    /// A point along a calculated route
    Route,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub coordinate: Coordinate,
    pub style: MarkerStyle,
    pub label: Option<String>,
}

impl MapMarker {
    pub const fn start(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            style: MarkerStyle::Start,
            label: None,
        }
    }

    pub const fn pick(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            style: MarkerStyle::Pick,
            label: None,
        }
    }

    pub const fn route(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            style: MarkerStyle::Route,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[component]
pub fn MapPanel(
    markers: Vec<MapMarker>,
    onpick: EventHandler<Coordinate>,
    center: Option<Coordinate>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let projection = MapProjection::centered_on(center);
    let meridians = (0..360 / GRID_STEP_DEGREES)
        .map(|step| projection.x_of(f64::from(step * GRID_STEP_DEGREES) - 180.0))
        .filter(|x| *x > 0.0 && *x < MAP_WIDTH)
        .collect::<Vec<f64>>();
    let parallels = (1..180 / GRID_STEP_DEGREES)
        .map(|step| f64::from(step * GRID_STEP_DEGREES) * MAP_HEIGHT / 180.0)
        .collect::<Vec<f64>>();

    rsx! {
        div {
            class: "map-container",
            style: "display: flex; flex-direction: column; gap: 6px;",

            div {
                class: "map-pad",
                style: "
                    position: relative;
                    width: {MAP_WIDTH}px;
                    height: {MAP_HEIGHT}px;
                    background: {colors.map_water};
                    border: 1px solid {colors.border};
                    border-radius: 6px;
                    overflow: hidden;
                    cursor: crosshair;
                ",
                onclick: move |evt: MouseEvent| {
                    let point = evt.element_coordinates();
                    if let Some(coordinate) = projection.coordinate_at(point.x, point.y) {
                        tracing::debug!(%coordinate, "Map clicked");
                        onpick.call(coordinate);
                    }
                },

                for x in meridians {
                    div {
                        style: "position: absolute; left: {x}px; top: 0; width: 1px; height: 100%; background: {colors.map_grid}; pointer-events: none;",
                    }
                }
                for y in parallels {
                    div {
                        style: "position: absolute; top: {y}px; left: 0; height: 1px; width: 100%; background: {colors.map_grid}; pointer-events: none;",
                    }
                }

                for marker in markers {
                    {
                        let (x, y) = projection.position_of(marker.coordinate);
                        let (size, color) = match marker.style {
                            MarkerStyle::Start => (14.0, colors.marker_start),
                            MarkerStyle::Pick => (14.0, colors.marker_pick),
                            MarkerStyle::Route => (6.0, colors.accent),
                        };
                        let left = x - size / 2.0;
                        let top = y - size / 2.0;
                        let title = marker
                            .label
                            .clone()
                            .unwrap_or_else(|| marker.coordinate.to_string());
                        rsx! {
                            div {
                                class: "map-marker",
                                title: "{title}",
                                style: "
                                    position: absolute;
                                    left: {left}px;
                                    top: {top}px;
                                    width: {size}px;
                                    height: {size}px;
                                    box-sizing: border-box;
                                    border-radius: 50%;
                                    border: 2px solid {colors.bg_primary};
                                    background: {color};
                                    pointer-events: none;
                                ",
                            }
                        }
                    }
                }
            }

            div {
                class: "map-caption",
                style: "font-size: 12px; color: {colors.text_muted};",
                if let Some(center) = center {
                    "Centered on longitude {center.longitude}. Click the map to pick a location."
                } else {
                    "Click the map to pick a location."
                }
            }
        }
    }
}
