use axum::{
    extract::{Request, State},
    http::{HeaderMap, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tracing::warn;

use crate::auth::AuthOutcome;
use crate::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_KEY_QUERY_PARAM: &str = "api_key";

/// API key middleware: short-circuits with 401 unless the presented key is valid
pub async fn api_key_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let presented = extract_api_key(
        request.headers(),
        request.uri(),
        state.config.auth.allow_query_key,
    );

    match state.authenticator.authenticate(presented.as_deref()).await {
        AuthOutcome::Authorized => next.run(request).await,
        AuthOutcome::Unauthorized(failure) => {
            warn!(path = %request.uri().path(), reason = ?failure, "Rejected request");
            ApiError::from(failure).into_response()
        }
    }
}

/// Wrap every route of `router` with the API key check
///
/// Uses `route_layer`, so unmatched paths still 404 instead of 401.
pub fn require_api_key(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, api_key_middleware))
}

/// Extract the API key from the `X-API-Key` header, or the `api_key` query parameter when allowed
///
/// A header with non-ASCII bytes is still a presented key; it just never matches.
fn extract_api_key(headers: &HeaderMap, uri: &Uri, allow_query: bool) -> Option<String> {
    let from_header = headers
        .get(API_KEY_HEADER)
        .filter(|v| !v.is_empty())
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    if from_header.is_some() || !allow_query {
        return from_header;
    }

    uri.query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == API_KEY_QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|v| !v.is_empty())
    })
}
