mod frontend;
mod handlers;
mod routes;
mod state;

pub use handlers::ProcessResponse;
pub use routes::create_router;
pub use state::AppState;
