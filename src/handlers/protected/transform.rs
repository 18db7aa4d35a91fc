use axum::{body::Bytes, Json};
use tracing::debug;

use crate::error::ApiError;
use crate::transform::{self, Record};

/// GET|POST /transform_data - add `Email Provider` to every submitted record
///
/// Takes the raw body rather than `Json<_>` so that bad JSON or a missing
/// content type is reported as a processing failure, not an extractor rejection.
pub async fn transform_data(body: Bytes) -> Result<Json<Vec<Record>>, ApiError> {
    let records = transform::transform_payload(&body)?;
    debug!(records = records.len(), "Transformed records");
    Ok(Json(records))
}
