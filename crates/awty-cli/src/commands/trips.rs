use awty_core::models::NewStop;
use awty_core::views::{DetailState, ListDisplay, SubmitOutcome, TripDetailView, TripForm, TripListView};
use awty_core::{FetchError, SortSpec, TripApi, TripId};
use chrono::Utc;

use crate::cli::TripCommands;
use crate::commands::common::{
    format_route_lines, format_stop_lines, format_trip_detail, format_trip_lines, open_client,
    parse_coordinate, parse_trip_id, trip_to_list_item, TripListItem,
};
use crate::error::CliError;

pub async fn run_trips(command: TripCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    let (_, client) = open_client(global_profile)?;
    match command {
        TripCommands::List { sort, order, json } => {
            run_list(&client, SortSpec::new(sort.into(), order.into()), json).await
        }
        TripCommands::Show { id, json } => run_show(&client, &id, json).await,
        TripCommands::Create {
            at,
            name,
            description,
            end,
        } => run_create(&client, &at, name, description, end).await,
        TripCommands::AddStop {
            id,
            at,
            description,
            order,
        } => run_add_stop(&client, &id, &at, description, order).await,
        TripCommands::Stops { id } => run_stops(&client, &id).await,
        TripCommands::Route {
            id,
            recalculate,
            json,
        } => run_route(&client, &id, recalculate, json).await,
        TripCommands::Delete { id } => run_delete(&client, &id).await,
    }
}

fn trip_error(trip_id: &TripId, error: FetchError) -> CliError {
    if error.is_not_found() {
        CliError::TripNotFound(trip_id.to_string())
    } else {
        CliError::Fetch(error)
    }
}

pub async fn run_list<A: TripApi>(api: &A, sort: SortSpec, as_json: bool) -> Result<(), CliError> {
    let mut view = TripListView::new();
    view.set_sort(sort);
    view.refresh(api).await;

    match view.display() {
        ListDisplay::Failed(message) => Err(CliError::Rejected(message)),
        ListDisplay::Loading => Ok(()),
        ListDisplay::NoTrips if as_json => {
            println!("[]");
            Ok(())
        }
        ListDisplay::NoTrips => {
            println!("No trips yet. Create one with `awty trips create`.");
            Ok(())
        }
        ListDisplay::Trips(trips) => {
            if as_json {
                let items = trips.iter().map(trip_to_list_item).collect::<Vec<TripListItem>>();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for line in format_trip_lines(&trips) {
                    println!("{line}");
                }
            }
            Ok(())
        }
    }
}

pub async fn run_show<A: TripApi>(api: &A, id: &str, as_json: bool) -> Result<(), CliError> {
    let mut view = TripDetailView::new(parse_trip_id(id)?);
    view.load(api).await;

    match view.state() {
        DetailState::Loaded(trip) if as_json => {
            println!("{}", serde_json::to_string_pretty(trip)?);
            Ok(())
        }
        DetailState::Loaded(trip) => {
            for line in format_trip_detail(trip) {
                println!("{line}");
            }
            Ok(())
        }
        DetailState::NotFound => Err(CliError::TripNotFound(id.trim().to_string())),
        DetailState::Failed(message) => Err(CliError::Rejected(message.clone())),
        DetailState::Loading => Ok(()),
    }
}

pub async fn run_create<A: TripApi>(
    api: &A,
    at: &str,
    name: String,
    description: String,
    end: Option<String>,
) -> Result<(), CliError> {
    let mut form = TripForm::new(parse_coordinate(at)?);
    form.name = name;
    form.description = description;
    form.end_location = end.unwrap_or_default();

    match form.submit(api).await {
        SubmitOutcome::Created(trip) => {
            println!("{}", trip.id);
            Ok(())
        }
        SubmitOutcome::Failed | SubmitOutcome::Rejected => Err(CliError::Rejected(
            form.error().unwrap_or("Trip was not created").to_string(),
        )),
    }
}

pub async fn run_add_stop<A: TripApi>(
    api: &A,
    id: &str,
    at: &str,
    description: String,
    order: Option<u32>,
) -> Result<(), CliError> {
    let trip_id = parse_trip_id(id)?;
    let location = parse_coordinate(at)?;
    let order = match order {
        Some(order) => order,
        None => api
            .get_trip(&trip_id)
            .await
            .map_err(|error| trip_error(&trip_id, error))?
            .next_stop_order(),
    };
    let stop = NewStop {
        location: location.to_string(),
        description: description.trim().to_string(),
        order,
    };

    let created = api.add_stop(&trip_id, &stop).await?;
    println!("Added stop {} to trip {trip_id}", created.order);
    Ok(())
}

pub async fn run_stops<A: TripApi>(api: &A, id: &str) -> Result<(), CliError> {
    let trip_id = parse_trip_id(id)?;
    let stops = api.list_stops(&trip_id).await?;
    if stops.is_empty() {
        println!("Trip {trip_id} has no stops.");
    }
    for line in format_stop_lines(&stops) {
        println!("{line}");
    }
    Ok(())
}

pub async fn run_route<A: TripApi>(
    api: &A,
    id: &str,
    recalculate: bool,
    as_json: bool,
) -> Result<(), CliError> {
    let trip_id = parse_trip_id(id)?;
    let route = api
        .get_route(&trip_id, recalculate)
        .await
        .map_err(|error| trip_error(&trip_id, error))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        for line in format_route_lines(&route, Utc::now()) {
            println!("{line}");
        }
    }
    Ok(())
}

pub async fn run_delete<A: TripApi>(api: &A, id: &str) -> Result<(), CliError> {
    let trip_id = parse_trip_id(id)?;
    api.delete_trip(&trip_id)
        .await
        .map_err(|error| trip_error(&trip_id, error))?;
    tracing::info!(trip_id = %trip_id, "Deleted trip");
    println!("Deleted trip {trip_id}");
    Ok(())
}
