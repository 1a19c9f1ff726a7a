//! Partitioning tickets into labelled buckets.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::{KeyParseError, Ticket, User};

/// Label used for tickets whose user id does not resolve to a known user.
pub const UNRESOLVED_USER_LABEL: &str = "undefined";

/// Key that selects how tickets are partitioned into columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    #[default]
    Status,
    User,
    Priority,
}

impl GroupKey {
    pub const ALL: [GroupKey; 3] = [GroupKey::Status, GroupKey::User, GroupKey::Priority];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Status => "status",
            GroupKey::User => "user",
            GroupKey::Priority => "priority",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(GroupKey::Status),
            "user" => Ok(GroupKey::User),
            "priority" => Ok(GroupKey::Priority),
            other => Err(KeyParseError::UnknownGroupKey(other.to_string())),
        }
    }
}

/// A single labelled column of tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub tickets: Vec<Ticket>,
}

/// Tickets partitioned by label.
///
/// Buckets iterate in the order their labels were first seen; tickets inside a
/// bucket keep the order they arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedBuckets {
    buckets: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl GroupedBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ticket to the bucket for `label`, creating the bucket if needed.
    pub fn push(&mut self, label: String, ticket: Ticket) {
        match self.index.get(&label) {
            Some(&idx) => self.buckets[idx].tickets.push(ticket),
            None => {
                self.index.insert(label.clone(), self.buckets.len());
                self.buckets.push(Bucket {
                    label,
                    tickets: vec![ticket],
                });
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&[Ticket]> {
        self.index
            .get(label)
            .map(|&idx| self.buckets[idx].tickets.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of tickets across all buckets.
    pub fn ticket_count(&self) -> usize {
        self.buckets.iter().map(|b| b.tickets.len()).sum()
    }

    /// Concatenate all buckets back into one list, bucket by bucket.
    pub fn flatten(&self) -> Vec<Ticket> {
        self.buckets
            .iter()
            .flat_map(|b| b.tickets.iter().cloned())
            .collect()
    }

    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }
}

impl Serialize for GroupedBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.label, &bucket.tickets)?;
        }
        map.end()
    }
}

/// Result of grouping by a free-form option name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Grouping {
    Grouped(GroupedBuckets),
    /// The option name was not recognized; tickets are returned as given.
    Ungrouped(Vec<Ticket>),
}

/// Partition `tickets` into buckets according to `key`.
pub fn group_tickets(tickets: &[Ticket], key: GroupKey, users: &[User]) -> GroupedBuckets {
    let mut grouped = GroupedBuckets::new();

    match key {
        GroupKey::Status => {
            for ticket in tickets {
                grouped.push(ticket.status.clone(), ticket.clone());
            }
        }
        GroupKey::Priority => {
            for ticket in tickets {
                grouped.push(ticket.priority.to_string(), ticket.clone());
            }
        }
        GroupKey::User => {
            let names: HashMap<&str, &str> = users
                .iter()
                .map(|u| (u.id.as_str(), u.name.as_str()))
                .collect();

            for ticket in tickets {
                let label = names
                    .get(ticket.user_id.as_str())
                    .copied()
                    .unwrap_or(UNRESOLVED_USER_LABEL);
                grouped.push(label.to_string(), ticket.clone());
            }
        }
    }

    grouped
}

/// Group by an option name as it might arrive from a stored setting.
///
/// Unrecognized names leave the tickets ungrouped instead of failing. This is
/// the entry point for callers holding a raw option string; typed callers use
/// [`group_tickets`], and the HTTP layer rejects unknown names before they get
/// here.
pub fn group_by_name(tickets: &[Ticket], option: &str, users: &[User]) -> Grouping {
    match option.parse::<GroupKey>() {
        Ok(key) => Grouping::Grouped(group_tickets(tickets, key, users)),
        Err(_) => Grouping::Ungrouped(tickets.to_vec()),
    }
}
