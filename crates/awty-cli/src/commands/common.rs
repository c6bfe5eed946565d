use awty_core::models::Stop;
use awty_core::{Coordinate, Trip, TripApiClient, TripId, TripRoute};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::{session_for_profile, KeyringTokenStore};
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub type CliClient = TripApiClient<KeyringTokenStore>;

#[derive(Debug, Serialize)]
pub struct TripListItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub created_at: String,
    pub relative_time: String,
    pub stops: usize,
}

/// Resolve the profile and build a client bound to its stored token.
pub fn open_client(global_profile: Option<&str>) -> Result<(String, CliClient), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let client_config = config.client_config(&profile_name)?;
    tracing::debug!(
        profile = %profile_name,
        api = %client_config.api_base_url,
        "Opening trip API client"
    );
    let client = TripApiClient::new(&client_config, session_for_profile(&profile_name))?;
    Ok((profile_name, client))
}

pub fn parse_trip_id(raw: &str) -> Result<TripId, CliError> {
    raw.parse::<TripId>()
        .map_err(|_| CliError::Rejected("Trip ID cannot be empty".to_string()))
}

pub fn parse_coordinate(raw: &str) -> Result<Coordinate, CliError> {
    Ok(raw.parse::<Coordinate>()?)
}

pub fn format_trip_lines(trips: &[Trip]) -> Vec<String> {
    let now = Utc::now();
    trips
        .iter()
        .map(|trip| {
            let name = preview(&trip.name, 32);
            let start = trip
                .start_coordinate()
                .map_or_else(|| "-".to_string(), |coordinate| coordinate.to_string());
            let relative_time = format_relative_time(trip.created_at, now);
            format!("{:<6}  {name:<32}  {start:<24}  {relative_time}", trip.id.as_str())
        })
        .collect()
}

pub fn trip_to_list_item(trip: &Trip) -> TripListItem {
    TripListItem {
        id: trip.id.to_string(),
        name: trip.name.clone(),
        description: trip.description.clone(),
        start_location: trip.start_coordinate().map(|coordinate| coordinate.to_string()),
        end_location: trip.end_location().map(str::to_string),
        created_at: trip.created_at.to_rfc3339(),
        relative_time: format_relative_time(trip.created_at, Utc::now()),
        stops: trip.stops.len(),
    }
}

pub fn format_trip_detail(trip: &Trip) -> Vec<String> {
    let mut lines = vec![
        trip.name.clone(),
        trip.description.clone(),
        String::new(),
        format!("ID:       {}", trip.id),
        format!(
            "Start:    {}",
            trip.start_coordinate()
                .map_or_else(|| "-".to_string(), |coordinate| coordinate.to_string())
        ),
        format!("End:      {}", trip.end_location().unwrap_or("-")),
        format!(
            "Created:  {}",
            trip.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    ];
    if trip.stops.is_empty() {
        lines.push("Stops:    none".to_string());
    } else {
        lines.push("Stops:".to_string());
        lines.extend(format_stop_lines(&trip.stops).into_iter().map(|line| format!("  {line}")));
    }
    lines
}

pub fn format_stop_lines(stops: &[Stop]) -> Vec<String> {
    let mut ordered = stops.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|stop| stop.order);
    ordered
        .into_iter()
        .map(|stop| {
            if stop.description.trim().is_empty() {
                format!("{:>3}. {}", stop.order, stop.location)
            } else {
                format!("{:>3}. {}  {}", stop.order, stop.location, stop.description.trim())
            }
        })
        .collect()
}

pub fn format_route_lines(route: &TripRoute, now: DateTime<Utc>) -> Vec<String> {
    let distance = route
        .distance_meters()
        .map_or_else(|| "-".to_string(), |meters| format!("{:.1} km", meters / 1000.0));
    let duration = route
        .duration_seconds()
        .map_or_else(|| "-".to_string(), |seconds| format!("{} min", (seconds / 60.0).round()));
    vec![
        format!("Trip:     {}", route.trip),
        format!("Distance: {distance}"),
        format!("Duration: {duration}"),
        format!("Points:   {}", route.path().len()),
        format!("Updated:  {}", format_relative_time(route.updated_at, now)),
    ]
}

pub fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp).num_seconds().max(0);
    let minute = 60;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
