pub mod board;
pub mod handlers;
pub mod middleware;
pub mod preferences;
pub mod routes;

pub use routes::create_router;
