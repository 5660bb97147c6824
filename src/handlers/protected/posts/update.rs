// handlers/protected/posts/update.rs - PUT /api/posts/:id

use axum::extract::{Extension, Path, State};

use crate::api::format::PostResource;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

use super::utils::{parse_post_id, post_not_found, PostInput};

/// PUT /api/posts/:id - replace the title and refresh `updated_at`.
///
/// The body is validated before the id is looked up, so an invalid payload
/// against an unknown id answers 422.
pub async fn post_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    PostInput(input): PostInput,
) -> ApiResult<PostResource> {
    let id = parse_post_id(&id)?;

    let post = match state.posts.update(id, &input.title).await? {
        Some(post) => post,
        None => {
            tracing::warn!("User {} tried to update missing post {}", user.user_id, id);
            return Err(post_not_found(id));
        }
    };

    tracing::info!("User {} updated post {}", user.user_id, post.id);
    Ok(ApiResponse::success(PostResource::from(post)))
}
