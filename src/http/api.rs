//! Ingestion API.

use crate::{
  app::{
    error::{ApiError, AppError},
    AppState,
  },
  ingest::{normalize, validate_log_data},
  models::log::new_log::StoredLog,
};
use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::{debug, info};

/// `POST /api/v1/log`: validate, normalize and store one log entry, then
/// echo the stored attributes with the assigned `log_id`.
pub async fn store_log(
  State(state): State<AppState>,
  body: Bytes,
) -> Result<Json<StoredLog>, ApiError> {
  if body.is_empty() {
    return Err(AppError::bad_request("Error: Request body can not be empty.").into());
  }

  let data: Value = serde_json::from_slice(&body).map_err(|e| {
    debug!("rejected non-JSON log payload: {e}");
    AppError::InvalidData
  })?;
  if !validate_log_data(&data) {
    return Err(AppError::InvalidData.into());
  }
  let attributes = normalize(&data).ok_or(AppError::InvalidData)?;

  let log_id = state.logs().insert(&attributes).await?;
  info!(
    log_id,
    source = %attributes.source,
    level = %attributes.level_name,
    "stored log"
  );

  Ok(Json(StoredLog { attributes, log_id }))
}
