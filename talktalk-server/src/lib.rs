// TalkTalk HTTP server: text-to-speech and chat with voice selection

pub mod chat;
pub mod config;
pub mod error;
pub mod http;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use http::{create_router, ApiState};
