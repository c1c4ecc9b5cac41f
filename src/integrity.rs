//! Keeps every live post pointing at a live user.
//!
//! Both checks run on the caller's connection, inside the caller's
//! transaction, so a failure anywhere rolls back the whole operation.

use diesel::sqlite::SqliteConnection;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::operations::{posts, users};

/// Insert-time check for `posts.author_id`.
pub fn ensure_author_exists(conn: &SqliteConnection, author_id: i64) -> Result<()> {
    if users::user_exists(conn, author_id)? {
        Ok(())
    } else {
        warn!(author_id, "rejecting post for missing author");
        Err(Error::ForeignKeyViolation {
            author_id: Some(author_id),
        })
    }
}

/// Deletes the posts of a user that is about to be deleted.
pub fn cascade_user_delete(conn: &SqliteConnection, user_id: i64) -> Result<usize> {
    let removed = posts::delete_all_by_author(conn, user_id)?;
    if removed > 0 {
        info!(user_id, removed, "cascading user delete to posts");
    }
    Ok(removed)
}
