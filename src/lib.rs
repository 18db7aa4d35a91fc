pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;
pub mod store;
pub mod transform;

pub use config::AppConfig;
pub use server::app;
pub use state::AppState;
