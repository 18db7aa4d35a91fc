// handlers/public/mod.rs - Public handlers (no API key required)
//
// Security Level: None (completely public access)
// Middleware: request tracing and CORS only

pub mod health;
pub mod home;

pub use health::health;
pub use home::home;
