// handlers/protected/posts/show.rs - GET /api/posts/:id

use axum::extract::{Extension, Path, State};

use crate::api::format::PostResource;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

use super::utils::{parse_post_id, post_not_found};

/// GET /api/posts/:id - a single post, or 404
pub async fn post_show(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<PostResource> {
    let id = parse_post_id(&id)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok(ApiResponse::success(PostResource::from(post)))
}
