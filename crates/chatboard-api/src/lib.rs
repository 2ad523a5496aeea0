pub mod envelope;
pub mod error;
pub mod messages;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::{AppState, AppStateInner};
