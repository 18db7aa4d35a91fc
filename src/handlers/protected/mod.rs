// handlers/protected/mod.rs - Protected handlers (API key required)
//
// These handlers assume the key check already ran. Mounted behind
// `middleware::require_api_key`, they are never reached on a 401.

pub mod resource;
pub mod transform;

pub use resource::protected_resource;
pub use transform::transform_data;
