use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use scribe_types::api::{
    Claims, CommentListResponse, CommentRequest, CommentResponse, MessageResponse,
};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::extract::Json;
use crate::timestamps::parse_db_timestamp;

pub async fn add_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // The target post is not checked for existence; a comment may point at a
    // post id that was deleted or never created.
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.insert_comment(&req.content, claims.sub, post_id))
        .await??;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Comment added successfully!".into(),
        }),
    ))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    // An unknown post id yields an empty list, not a 404.
    let db = state.clone();
    let rows =
        tokio::task::spawn_blocking(move || db.db.list_comments_for_post(post_id)).await??;

    let comments = rows
        .into_iter()
        .map(|row| CommentResponse {
            id: row.id,
            content: row.content,
            author_id: row.author_id,
            created_at: parse_db_timestamp(&row.created_at),
        })
        .collect();

    Ok(Json(CommentListResponse { comments }))
}

/// Lookup is by comment id alone; the path's post id is then checked against
/// the stored one and a mismatch is rejected without touching the row.
pub async fn update_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Extension(_claims): Extension<Claims>,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || {
        let comment = db
            .db
            .get_comment(comment_id)?
            .ok_or_else(|| ApiError::NotFound("Comment not found".into()))?;

        if comment.post_id != post_id {
            return Err(ApiError::BadRequest(
                "Comment does not belong to the specified post".into(),
            ));
        }

        db.db.update_comment(comment_id, &req.content)?;
        Ok(())
    })
    .await??;

    Ok(Json(MessageResponse {
        message: "Comment updated successfully!".into(),
    }))
}

/// Identical lookup-then-mismatch-check pattern as [`update_comment`].
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || {
        let comment = db
            .db
            .get_comment(comment_id)?
            .ok_or_else(|| ApiError::NotFound("Comment not found".into()))?;

        if comment.post_id != post_id {
            return Err(ApiError::BadRequest(
                "Comment does not belong to the specified post".into(),
            ));
        }

        db.db.delete_comment(comment_id)?;
        Ok(())
    })
    .await??;

    Ok(Json(MessageResponse {
        message: "Comment deleted successfully!".into(),
    }))
}
