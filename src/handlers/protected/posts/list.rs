// handlers/protected/posts/list.rs - GET /api/posts

use axum::extract::{Extension, State};

use crate::api::format::{posts_to_resources, PostResource};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

/// GET /api/posts - every post, wrapped as `{ "data": [...] }`
pub async fn post_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<PostResource>> {
    let posts = state.posts.list().await?;
    tracing::debug!("User {} listed {} posts", user.user_id, posts.len());

    Ok(ApiResponse::collection(posts_to_resources(&posts)))
}
