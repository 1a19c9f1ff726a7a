//! Ordering tickets within a column.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::{KeyParseError, Ticket};

/// Key that selects how tickets are ordered inside a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Priority,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Priority, SortKey::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Priority => "priority",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(SortKey::Priority),
            "title" => Ok(SortKey::Title),
            other => Err(KeyParseError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Compare two titles the way a reader would expect them alphabetised.
///
/// Letters compare by their base form first, ignoring accents and case, so
/// `Éclair` sorts next to `eclair` rather than after `z`. Remaining ties are
/// broken by accents (unaccented first) and then by case (lowercase first).
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Reorder `tickets` in place according to `key`.
///
/// Priority sorts highest first. The sort is stable, so equal keys keep their
/// arrival order.
pub fn sort_tickets(tickets: &mut [Ticket], key: SortKey) {
    match key {
        SortKey::Priority => tickets.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortKey::Title => tickets.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
}

/// Sort by an option name as it might arrive from a stored setting.
///
/// Unrecognized names leave the order untouched. This is the entry point for
/// callers holding a raw option string; typed callers use [`sort_tickets`],
/// and the HTTP layer rejects unknown names before they get here.
pub fn sort_by_name(tickets: &mut [Ticket], option: &str) {
    if let Ok(key) = option.parse::<SortKey>() {
        sort_tickets(tickets, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::ticket;

    fn ids(tickets: &[Ticket]) -> Vec<&str> {
        tickets.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("priority".parse::<SortKey>().unwrap(), SortKey::Priority);
        assert_eq!("title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert!(matches!(
            "date".parse::<SortKey>(),
            Err(KeyParseError::UnknownSortKey(_))
        ));
    }

    #[test]
    fn test_sort_by_priority_example() {
        let mut tickets = vec![ticket("1", "B", "Todo", 2, "u1"), ticket("2", "A", "Todo", 4, "u1")];
        sort_tickets(&mut tickets, SortKey::Priority);
        assert_eq!(ids(&tickets), vec!["2", "1"]);
    }

    #[test]
    fn test_sort_by_priority_is_non_increasing() {
        let mut tickets: Vec<Ticket> = [0u8, 3, 1, 4, 2, 4, 0, 3]
            .iter()
            .enumerate()
            .map(|(i, p)| ticket(&i.to_string(), "T", "Todo", *p, "u1"))
            .collect();

        sort_tickets(&mut tickets, SortKey::Priority);

        assert!(tickets.windows(2).all(|w| w[0].priority >= w[1].priority));
        assert_eq!(tickets.first().unwrap().priority, 4);
        assert_eq!(tickets.last().unwrap().priority, 0);
    }

    #[test]
    fn test_sort_by_priority_keeps_arrival_order_for_ties() {
        let mut tickets = vec![
            ticket("a", "T", "Todo", 1, "u1"),
            ticket("b", "T", "Todo", 3, "u1"),
            ticket("c", "T", "Todo", 1, "u1"),
            ticket("d", "T", "Todo", 3, "u1"),
        ];
        sort_tickets(&mut tickets, SortKey::Priority);
        assert_eq!(ids(&tickets), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let mut tickets = vec![
            ticket("1", "banana", "Todo", 0, "u1"),
            ticket("2", "Cherry", "Todo", 0, "u1"),
            ticket("3", "apple", "Todo", 0, "u1"),
            ticket("4", "Apricot", "Todo", 0, "u1"),
        ];
        sort_tickets(&mut tickets, SortKey::Title);
        assert_eq!(ids(&tickets), vec!["3", "4", "1", "2"]);
    }

    #[test]
    fn test_sort_by_title_is_non_decreasing() {
        let mut tickets: Vec<Ticket> = ["Zeta", "alpha", "Mu", "beta", "Alpha", "", "mu"]
            .iter()
            .enumerate()
            .map(|(i, title)| ticket(&i.to_string(), title, "Todo", 0, "u1"))
            .collect();

        sort_tickets(&mut tickets, SortKey::Title);

        assert!(tickets
            .windows(2)
            .all(|w| compare_titles(&w[0].title, &w[1].title) != Ordering::Greater));
        assert_eq!(tickets[0].title, "");
    }

    #[test]
    fn test_compare_titles_lowercase_first_on_tie() {
        assert_eq!(compare_titles("alpha", "Alpha"), Ordering::Less);
        assert_eq!(compare_titles("Alpha", "alpha"), Ordering::Greater);
        assert_eq!(compare_titles("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_title_places_accented_letters_with_base_letter() {
        let mut tickets = vec![
            ticket("1", "Zebra", "Todo", 0, "u1"),
            ticket("2", "Éclair", "Todo", 0, "u1"),
            ticket("3", "Fig", "Todo", 0, "u1"),
            ticket("4", "eclair", "Todo", 0, "u1"),
        ];
        sort_tickets(&mut tickets, SortKey::Title);
        assert_eq!(ids(&tickets), vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn test_compare_titles_accent_breaks_ties_before_case() {
        assert_eq!(compare_titles("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_titles("Resume", "résumé"), Ordering::Less);
        assert_eq!(compare_titles("Ångström", "angstrom"), Ordering::Greater);
        assert_eq!(compare_titles("Über", "uber"), Ordering::Greater);
        assert_eq!(compare_titles("über", "Über"), Ordering::Less);
    }

    #[test]
    fn test_sort_by_unknown_name_is_noop() {
        let original = vec![
            ticket("1", "B", "Todo", 0, "u1"),
            ticket("2", "A", "Todo", 4, "u1"),
            ticket("3", "C", "Todo", 2, "u1"),
        ];
        let mut tickets = original.clone();
        sort_by_name(&mut tickets, "created_at");
        assert_eq!(tickets, original);

        sort_by_name(&mut tickets, "title");
        assert_eq!(ids(&tickets), vec!["2", "1", "3"]);
    }
}
