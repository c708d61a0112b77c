use crate::Database;
use crate::models::{CommentRow, PostRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(&self, username: &str, email: &str, password_hash: &str) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (username, email, password_hash) VALUES (?1, ?2, ?3)",
                (username, email, password_hash),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    // -- Posts --

    pub fn insert_post(&self, title: &str, content: &str, author_id: i64) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO blog_posts (title, content, author_id) VALUES (?1, ?2, ?3)",
                rusqlite::params![title, content, author_id],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| query_all_posts(conn))
    }

    pub fn get_post(&self, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| query_post(conn, id))
    }

    /// Full overwrite of title and content. Returns false when no post has
    /// that id.
    pub fn update_post(&self, id: i64, title: &str, content: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE blog_posts SET title = ?1, content = ?2 WHERE id = ?3",
                rusqlite::params![title, content, id],
            )?;
            Ok(changed > 0)
        })
    }

    /// Deletes a post. With `cascade` the post's comments go away in the same
    /// transaction; otherwise they are left in place as orphans.
    pub fn delete_post(&self, id: i64, cascade: bool) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if cascade {
                tx.execute("DELETE FROM comments WHERE post_id = ?1", [id])?;
            }
            let deleted = tx.execute("DELETE FROM blog_posts WHERE id = ?1", [id])?;
            tx.commit()?;
            Ok(deleted > 0)
        })
    }

    // -- Comments --

    pub fn insert_comment(&self, content: &str, author_id: i64, post_id: i64) -> Result<i64> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO comments (content, author_id, post_id) VALUES (?1, ?2, ?3)",
                rusqlite::params![content, author_id, post_id],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_comments_for_post(&self, post_id: i64) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| query_comments_for_post(conn, post_id))
    }

    pub fn get_comment(&self, id: i64) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| query_comment(conn, id))
    }

    pub fn update_comment(&self, id: i64, content: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE comments SET content = ?1 WHERE id = ?2",
                rusqlite::params![content, id],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn delete_comment(&self, id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
            Ok(deleted > 0)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE username = ?1",
    )?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                password_hash: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                password_hash: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_all_posts(conn: &Connection) -> Result<Vec<PostRow>> {
    // Stable insertion order; the API makes no ordering promise beyond that.
    let mut stmt = conn.prepare(
        "SELECT id, title, content, author_id, created_at FROM blog_posts ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(PostRow {
                id: row.get(0)?,
                title: row.get(1)?,
                content: row.get(2)?,
                author_id: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_post(conn: &Connection, id: i64) -> Result<Option<PostRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, content, author_id, created_at FROM blog_posts WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(PostRow {
                id: row.get(0)?,
                title: row.get(1)?,
                content: row.get(2)?,
                author_id: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_comments_for_post(conn: &Connection, post_id: i64) -> Result<Vec<CommentRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, content, author_id, post_id, created_at FROM comments
         WHERE post_id = ?1
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map([post_id], |row| {
            Ok(CommentRow {
                id: row.get(0)?,
                content: row.get(1)?,
                author_id: row.get(2)?,
                post_id: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_comment(conn: &Connection, id: i64) -> Result<Option<CommentRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, content, author_id, post_id, created_at FROM comments WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(CommentRow {
                id: row.get(0)?,
                content: row.get(1)?,
                author_id: row.get(2)?,
                post_id: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
