// handlers/protected/posts/delete.rs - DELETE /api/posts/:id

use axum::extract::{Extension, Path, State};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

use super::utils::{parse_post_id, post_not_found};

/// DELETE /api/posts/:id - 204 with an empty body, 404 when the id is unknown
pub async fn post_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_post_id(&id)?;

    if !state.posts.delete(id).await? {
        tracing::warn!("User {} tried to delete missing post {}", user.user_id, id);
        return Err(post_not_found(id));
    }

    tracing::info!("User {} deleted post {}", user.user_id, id);
    Ok(ApiResponse::no_content())
}
