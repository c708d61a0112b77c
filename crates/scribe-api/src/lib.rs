pub mod auth;
pub mod comments;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod posts;
mod timestamps;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

use crate::auth::AppState;

/// Assemble the full application router. Public routes carry no auth; the
/// protected set is gated by [`middleware::require_auth`]. Reads and writes
/// on the same path keep their own auth treatment when the routers merge.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/posts", get(posts::list_posts))
        .route("/posts/{post_id}", get(posts::get_post))
        .route("/posts/{post_id}/comments", get(comments::list_comments))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/user", get(auth::get_user))
        .route("/posts", post(posts::create_post))
        .route("/posts/{post_id}", put(posts::update_post))
        .route("/posts/{post_id}", delete(posts::delete_post))
        .route("/posts/{post_id}/comments", post(comments::add_comment))
        .route(
            "/posts/{post_id}/comments/{comment_id}",
            put(comments::update_comment),
        )
        .route(
            "/posts/{post_id}/comments/{comment_id}",
            delete(comments::delete_comment),
        )
        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}
