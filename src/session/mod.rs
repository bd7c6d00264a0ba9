pub mod api_session;
pub mod dto;
pub mod retry_session;
pub mod urls;

pub use api_session::ApiSession;
pub use retry_session::RetrySession;
