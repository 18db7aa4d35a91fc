pub mod auth;

pub use auth::{api_key_middleware, require_api_key, API_KEY_HEADER};
