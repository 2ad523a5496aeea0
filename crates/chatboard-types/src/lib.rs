pub mod api;
pub mod models;

pub use api::{CreateMessageRequest, Envelope, ErrorEnvelope, validate};
pub use models::Message;
