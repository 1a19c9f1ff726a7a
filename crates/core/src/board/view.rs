//! Render-ready board: grouped columns with sorted cards.

use serde::Serialize;

use super::{group_tickets, priority_label, sort_tickets, BoardData, GroupKey, SortKey, Ticket};

/// A ticket as shown inside a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    pub status: String,
    pub priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_label: Option<&'static str>,
    pub tag: Vec<String>,
    pub user_id: String,
    /// Set for tickets at the maximum priority.
    pub urgent: bool,
}

impl From<Ticket> for Card {
    fn from(ticket: Ticket) -> Self {
        Self {
            urgent: ticket.is_urgent(),
            priority_label: priority_label(ticket.priority),
            id: ticket.id,
            title: ticket.title,
            status: ticket.status,
            priority: ticket.priority,
            tag: ticket.tag,
            user_id: ticket.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub label: String,
    pub count: usize,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub grouping: GroupKey,
    pub sorting: SortKey,
    pub total: usize,
    pub columns: Vec<Column>,
}

impl BoardView {
    /// Group the loaded tickets, then sort each column.
    pub fn build(data: &BoardData, grouping: GroupKey, sorting: SortKey) -> Self {
        let grouped = group_tickets(&data.tickets, grouping, &data.users);
        let total = grouped.ticket_count();

        let columns = grouped
            .into_buckets()
            .into_iter()
            .map(|mut bucket| {
                sort_tickets(&mut bucket.tickets, sorting);
                Column {
                    label: bucket.label,
                    count: bucket.tickets.len(),
                    cards: bucket.tickets.into_iter().map(Card::from).collect(),
                }
            })
            .collect();

        Self {
            grouping,
            sorting,
            total,
            columns,
        }
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_build_groups_and_sorts_each_column() {
        let data = fixtures::board_data();
        let view = BoardView::build(&data, GroupKey::Status, SortKey::Priority);

        assert_eq!(view.total, data.tickets.len());
        for column in &view.columns {
            assert_eq!(column.count, column.cards.len());
            assert!(column
                .cards
                .windows(2)
                .all(|w| w[0].priority >= w[1].priority));
        }
    }

    #[test]
    fn test_build_by_title_orders_cards_alphabetically() {
        let data = fixtures::board_data();
        let view = BoardView::build(&data, GroupKey::User, SortKey::Title);

        let alice = view.column("Alice").unwrap();
        let titles: Vec<&str> = alice.cards.iter().map(|c| c.title.as_str()).collect();
        let mut expected = titles.clone();
        expected.sort_by(|a, b| crate::board::compare_titles(a, b));
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_urgent_marker_only_at_max_priority() {
        let data = fixtures::board_data();
        let view = BoardView::build(&data, GroupKey::Priority, SortKey::Priority);

        for column in &view.columns {
            for card in &column.cards {
                assert_eq!(card.urgent, card.priority == 4);
            }
        }
        let urgent = view.column("4").unwrap();
        assert_eq!(urgent.cards[0].priority_label, Some("Urgent"));
    }

    #[test]
    fn test_card_serializes_with_ticket_field_names() {
        let card = Card::from(fixtures::ticket("CAM-1", "Fix login", "Todo", 4, "usr-1"));
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["userId"], "usr-1");
        assert_eq!(value["priorityLabel"], "Urgent");
        assert!(value.get("user_id").is_none());
        assert!(value.get("priority_label").is_none());
    }

    #[test]
    fn test_build_on_empty_data() {
        let view = BoardView::build(&BoardData::default(), GroupKey::Status, SortKey::Title);
        assert!(view.columns.is_empty());
        assert_eq!(view.total, 0);
    }
}
