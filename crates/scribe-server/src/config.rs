use anyhow::Result;

/// Runtime configuration, read once at startup from the environment
/// (a `.env` file is honored via dotenvy before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub jwt_secret: String,
    /// When true, deleting a post also removes its comments in the same
    /// transaction. Defaults to false: orphaned comments are kept.
    pub cascade_comment_delete: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("SCRIBE_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("SCRIBE_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()?;
        let db_path = std::env::var("SCRIBE_DB_PATH").unwrap_or_else(|_| "scribe.db".into());
        let jwt_secret =
            std::env::var("SCRIBE_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
        let cascade_comment_delete = std::env::var("SCRIBE_CASCADE_COMMENT_DELETE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            db_path,
            jwt_secret,
            cascade_comment_delete,
        })
    }
}
