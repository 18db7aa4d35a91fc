pub const WELCOME: &str = "Welcome to the API! This is an unprotected endpoint.";

/// GET / - plaintext welcome, no key required
pub async fn home() -> &'static str {
    WELCOME
}
