use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller resolved from a verified JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub name: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = ApiError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims.sub.parse::<i64>().map_err(|_| {
            tracing::warn!("Rejected token with non-numeric subject '{}'", claims.sub);
            ApiError::unauthorized("Unauthenticated.")
        })?;

        Ok(Self {
            user_id,
            name: claims.name,
        })
    }
}

/// Rejects the request with 401 unless it carries a valid bearer token.
/// Runs before any extractor of the wrapped handler, so body validation
/// never sees an anonymous request.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = state.jwt.validate(token).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Unauthenticated.")
    })?;

    let auth_user = AuthUser::try_from(claims)?;
    tracing::debug!("Authenticated user {} ({})", auth_user.user_id, auth_user.name);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or("Unauthenticated.")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty JWT token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}
