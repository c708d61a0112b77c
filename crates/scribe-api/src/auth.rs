use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};

use scribe_db::Database;
use scribe_types::api::{
    Claims, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserResponse,
};

use crate::error::ApiError;
use crate::extract::Json;
use crate::timestamps::parse_db_timestamp;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    /// When true, deleting a post also deletes its comments. Off by default:
    /// orphaned comments are kept.
    pub cascade_comment_delete: bool,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Argon2 is deliberately slow, so hashing runs off the async runtime
    // together with the uniqueness check and insert.
    let db = state.clone();
    tokio::task::spawn_blocking(move || {
        // Check if username is taken; the UNIQUE constraint remains as backstop.
        if db.db.get_user_by_username(&req.username)?.is_some() {
            return Err(ApiError::Conflict("Username already exists".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?
            .to_string();

        db.db.create_user(&req.username, &req.email, &password_hash)?;
        Ok(())
    })
    .await??;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully!".into(),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user = tokio::task::spawn_blocking(move || {
        // Unknown username and wrong password are indistinguishable to the
        // caller.
        let user = db
            .db
            .get_user_by_username(&req.username)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".into()))?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| anyhow::anyhow!("stored hash unreadable: {}", e))?;

        Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .map_err(|_| ApiError::Unauthorized("Invalid username or password".into()))?;

        Ok::<_, ApiError>(user)
    })
    .await??;

    let access_token = create_token(&state.jwt_secret, user.id)?;

    Ok(Json(LoginResponse { access_token }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_id(claims.sub))
        .await??
        // Users are never deleted, but a token can outlive a rebuilt database.
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: parse_db_timestamp(&user.created_at),
    }))
}

fn create_token(secret: &str, user_id: i64) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        exp: (chrono::Utc::now() + chrono::Duration::days(1)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
