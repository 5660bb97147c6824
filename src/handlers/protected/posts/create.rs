// handlers/protected/posts/create.rs - POST /api/posts

use axum::extract::{Extension, State};

use crate::api::format::PostResource;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

use super::utils::PostInput;

/**
 * POST /api/posts - Create a post
 *
 * Expected Input:
 * ```json
 * { "title": "string" }   // Required, non-empty, at most 255 characters
 * ```
 *
 * @returns 201 with `{ id, title, created_at, updated_at }`, or 422 naming `title`
 */
pub async fn post_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    PostInput(input): PostInput,
) -> ApiResult<PostResource> {
    let post = state.posts.create(&input.title).await?;
    tracing::info!("User {} created post {}", user.user_id, post.id);

    Ok(ApiResponse::created(PostResource::from(post)))
}
