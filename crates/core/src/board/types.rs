//! Ticket and user records as delivered by the board source.

use serde::{Deserialize, Deserializer, Serialize};

/// Highest priority value; cards at this level carry the urgent marker.
pub const PRIORITY_URGENT: u8 = 4;

/// Read an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A ticket shown on the board.
///
/// Every field defaults when absent or null so a partially filled payload
/// still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Free-form tags attached by the source.
    #[serde(deserialize_with = "null_as_default")]
    pub tag: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Ordinal priority, 0 (no priority) through 4 (urgent).
    #[serde(deserialize_with = "null_as_default")]
    pub priority: u8,
}

impl Ticket {
    /// Whether this ticket sits at the maximum priority.
    pub fn is_urgent(&self) -> bool {
        self.priority == PRIORITY_URGENT
    }
}

/// A user that tickets can be assigned to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub available: bool,
}

/// The full payload returned by a board source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoardData {
    #[serde(deserialize_with = "null_as_default")]
    pub tickets: Vec<Ticket>,
    #[serde(deserialize_with = "null_as_default")]
    pub users: Vec<User>,
}

/// Human readable label for a priority value.
///
/// Returns `None` for values outside 0..=4.
pub fn priority_label(priority: u8) -> Option<&'static str> {
    match priority {
        4 => Some("Urgent"),
        3 => Some("High"),
        2 => Some("Medium"),
        1 => Some("Low"),
        0 => Some("No priority"),
        _ => None,
    }
}
