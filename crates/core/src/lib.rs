pub mod board;
pub mod config;
pub mod loader;
pub mod metrics;
pub mod preferences;
pub mod session;
pub mod testing;

pub use board::{
    compare_titles, group_by_name, group_tickets, priority_label, sort_by_name, sort_tickets,
    BoardData, BoardView, Bucket, Card, Column, GroupKey, GroupedBuckets, Grouping, KeyParseError,
    SortKey, Ticket, User, PRIORITY_URGENT, UNRESOLVED_USER_LABEL,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    ServerConfig, SourceConfig, DEFAULT_SOURCE_URL,
};
pub use loader::{BoardSource, HttpBoardSource, LoadError};
pub use preferences::{
    PreferenceError, PreferenceStore, Preferences, PreferencesUpdate, SqlitePreferenceStore,
    GROUPING_KEY, SORTING_KEY,
};
pub use session::{BoardSession, BoardStatus, SessionError};
