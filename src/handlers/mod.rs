// handlers/mod.rs - Two-tier handler layout
//
// Public (no key) → Protected (X-API-Key checked against the key store).
// The tier a handler lives in only documents intent; the key check itself
// is applied in `server::app` via `middleware::require_api_key`.

pub mod public;    // Tier 1: No authentication required (/, /health)
pub mod protected; // Tier 2: API key required (/protected, /transform_data)
