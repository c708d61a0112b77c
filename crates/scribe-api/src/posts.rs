use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use scribe_db::models::PostRow;
use scribe_types::api::{
    Claims, CreatePostRequest, MessageResponse, PostListResponse, PostResponse, UpdatePostRequest,
};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::Json;
use crate::timestamps::parse_db_timestamp;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // author_id always comes from the token, never from the body.
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.insert_post(&req.title, &req.content, claims.sub))
        .await??;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Blog post created successfully!".into(),
        }),
    ))
}

pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_posts()).await??;

    let posts = rows.into_iter().map(post_response).collect();

    Ok(Json(PostListResponse { posts }))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_post(post_id))
        .await??
        .ok_or_else(|| ApiError::NotFound("Blog post not found".into()))?;

    Ok(Json(post_response(row)))
}

/// Any authenticated user may edit any post; there is no ownership check.
pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(_claims): Extension<Claims>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let updated = tokio::task::spawn_blocking(move || {
        db.db.update_post(post_id, &req.title, &req.content)
    })
    .await??;

    if !updated {
        return Err(ApiError::NotFound("Blog post not found".into()));
    }

    Ok(Json(MessageResponse {
        message: "Blog post updated successfully!".into(),
    }))
}

/// Same no-ownership-check model as [`update_post`]. Whether the post's
/// comments go with it is a deployment decision; see
/// `AppStateInner::cascade_comment_delete`.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let cascade = state.cascade_comment_delete;
    let deleted = tokio::task::spawn_blocking(move || db.db.delete_post(post_id, cascade))
        .await??;

    if !deleted {
        return Err(ApiError::NotFound("Blog post not found".into()));
    }

    Ok(Json(MessageResponse {
        message: "Blog post deleted successfully!".into(),
    }))
}

fn post_response(row: PostRow) -> PostResponse {
    PostResponse {
        id: row.id,
        title: row.title,
        content: row.content,
        author_id: row.author_id,
        created_at: parse_db_timestamp(&row.created_at),
    }
}
