//! Client-side trip ordering

use std::cmp::Ordering;

use super::Trip;

/// Field a trip list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Pure UI sort state. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

/// Return a sorted copy of `trips`; the input is left untouched.
///
/// The sort is stable: trips with equal keys keep their relative order in
/// both directions.
#[must_use]
pub fn sort_trips(trips: &[Trip], spec: SortSpec) -> Vec<Trip> {
    let mut sorted = trips.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, spec.key);
        match spec.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    sorted
}

fn compare_by_key(a: &Trip, b: &Trip, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_case_insensitive(&a.name, &b.name),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
