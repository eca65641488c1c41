//! Split API endpoint.
//!
//! Accepts `{"text": "..."}` and returns the document's sections as a JSON
//! array.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use mdsplit_sections::Section;
use serde_json::Value;

use crate::error::ServerError;
use crate::handlers::text_argument;

/// Handle POST /api/split.
pub(crate) async fn post_split(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<Section>>, ServerError> {
    let Json(body) = payload?;
    let text = text_argument(&body)?;

    let sections = mdsplit_sections::split(text);
    tracing::debug!(
        chars = text.chars().count(),
        sections = sections.len(),
        "Split request processed"
    );

    Ok(Json(sections))
}
