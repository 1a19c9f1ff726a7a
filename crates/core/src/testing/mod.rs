//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use kanban_core::testing::{fixtures, MockBoardSource};
//!
//! let source = MockBoardSource::with_data(fixtures::board_data());
//! source.push_error("upstream unavailable").await;
//!
//! // First load fails, later loads return the fixture data.
//! ```

mod mock_source;

pub use mock_source::MockBoardSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::board::{BoardData, Ticket, User};

    /// Create a ticket with the given fields and no tags.
    pub fn ticket(id: &str, title: &str, status: &str, priority: u8, user_id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            tag: vec![],
            user_id: user_id.to_string(),
            status: status.to_string(),
            priority,
        }
    }

    /// Create an available user.
    pub fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            available: true,
        }
    }

    /// A small board covering every status, priority and an unassigned user id.
    pub fn board_data() -> BoardData {
        BoardData {
            tickets: vec![
                ticket("CAM-1", "Update user profile page UI", "Todo", 4, "usr-1"),
                ticket("CAM-2", "Add multi-language support", "In progress", 3, "usr-2"),
                ticket("CAM-3", "Optimize database queries", "In progress", 1, "usr-1"),
                ticket("CAM-4", "Implement email notifications", "Todo", 2, "usr-3"),
                ticket("CAM-5", "conduct security review", "Backlog", 0, "usr-2"),
                ticket("CAM-6", "Enhance search functionality", "Todo", 4, "usr-1"),
                ticket("CAM-7", "Create onboarding tutorial", "Done", 1, "usr-9"),
                ticket("CAM-8", "Audit log retention", "Backlog", 2, "usr-1"),
            ],
            users: vec![user("usr-1", "Alice"), user("usr-2", "Bob"), user("usr-3", "Carol")],
        }
    }
}
