//! Board model and the grouping/sorting engine.
//!
//! Tickets are partitioned into labelled buckets by a [`GroupKey`] and each
//! bucket is ordered by a [`SortKey`] when a [`BoardView`] is built.

mod group;
mod sort;
mod types;
mod view;

pub use group::{
    group_by_name, group_tickets, Bucket, GroupKey, GroupedBuckets, Grouping,
    UNRESOLVED_USER_LABEL,
};
pub use sort::{compare_titles, sort_by_name, sort_tickets, SortKey};
pub use types::{priority_label, BoardData, Ticket, User, PRIORITY_URGENT};
pub use view::{BoardView, Card, Column};

use thiserror::Error;

/// Error parsing a grouping or sorting option.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Unknown grouping option: {0} (expected status, user or priority)")]
    UnknownGroupKey(String),

    #[error("Unknown sorting option: {0} (expected priority or title)")]
    UnknownSortKey(String),
}
