//! Derived views over the store: lifecycle filter, text search, ordering.
//!
//! These are pure and recomputed on every render; nothing is cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::models::Note;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Saved,
    Active,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Created,
    Expiry,
    Priority,
}

/// Lifecycle filter, then a case-insensitive substring match on content or
/// category name. An empty term matches everything. Input order is kept.
pub fn filter_and_search<'a, I>(
    notes: I,
    filter: Filter,
    search_term: &str,
    now: DateTime<Utc>,
) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let needle = search_term.to_lowercase();
    notes
        .into_iter()
        .filter(|note| match filter {
            Filter::All => true,
            Filter::Saved => note.saved,
            Filter::Active => note.is_active(now),
        })
        .filter(|note| needle.is_empty() || matches_term(note, &needle))
        .collect()
}

/// Stable sort: ties keep their incoming order.
pub fn sort_notes(mut notes: Vec<&Note>, sort_by: SortBy) -> Vec<&Note> {
    match sort_by {
        SortBy::Created => notes.sort_by_key(|n| Reverse(n.created_at)),
        SortBy::Expiry => notes.sort_by_key(|n| n.expires_at),
        SortBy::Priority => notes.sort_by_key(|n| Reverse(n.effective_priority().weight())),
    }
    notes
}

/// Coarse countdown label: `Expired`, or the largest whole unit of days,
/// hours, minutes or seconds left.
pub fn format_time_left(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let left = expires_at - now;
    if left.num_milliseconds() <= 0 {
        return "Expired".to_string();
    }

    let days = left.num_days();
    let hours = left.num_hours();
    let minutes = left.num_minutes();
    if days > 0 {
        format!("{days}d left")
    } else if hours > 0 {
        format!("{hours}h left")
    } else if minutes > 0 {
        format!("{minutes}m left")
    } else {
        format!("{}s left", left.num_seconds())
    }
}

fn matches_term(note: &Note, needle: &str) -> bool {
    note.content.to_lowercase().contains(needle)
        || note
            .category
            .is_some_and(|c| c.as_str().to_lowercase().contains(needle))
}
