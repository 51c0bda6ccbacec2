pub mod auth;
pub mod json;
pub mod response;

pub use auth::AuthAdmin;
pub use json::JsonBody;
pub use response::{message, ApiResponse, ApiResult};
