use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::error::ApiError;
use crate::validation::{validate_post, PostPayload, ValidPost};

/// Body of a create/update request, already validated.
///
/// An empty body counts as an empty payload so it fails on `title` with 422;
/// only a body that is not JSON at all is a 400, and one over the size limit a 413.
#[derive(Debug)]
pub struct PostInput(pub ValidPost);

#[async_trait]
impl<S> FromRequest<S> for PostInput
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::from(rejection).into_response())?;

        let payload = parse_payload(&bytes).map_err(IntoResponse::into_response)?;
        let valid = validate_post(&payload).map_err(|errors| ApiError::from(errors).into_response())?;

        Ok(PostInput(valid))
    }
}

fn parse_payload(bytes: &[u8]) -> Result<PostPayload, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(PostPayload::default());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::invalid_json(format!("Request body is not valid JSON: {}", e)))?;

    Ok(PostPayload::from_value(value))
}

/// Path ids that are not integers cannot name a post, so they are a 404 like any unknown id
pub fn parse_post_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| post_not_found(raw))
}

pub fn post_not_found(id: impl std::fmt::Display) -> ApiError {
    ApiError::not_found(format!("Post {} not found", id))
}
