use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::{delete, insert_into, select, update};
use tracing::{debug, warn};

use super::last_insert_rowid;
use crate::db::schema::posts::dsl::*;
use crate::error::{Error, Result};
use crate::models::{NewPost, Page, Post, PostChanges, User};

pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Inserts a post without checking its author; see `integrity::ensure_author_exists`.
pub fn insert_post(
    conn: &SqliteConnection,
    new_title: Option<&str>,
    new_content: Option<&str>,
    author: i64,
) -> Result<i64> {
    let now = Utc::now().naive_utc();
    let new_post = NewPost {
        title: new_title,
        content: new_content,
        author_id: author,
        created_at: now,
        updated_at: now,
    };
    insert_into(posts).values(&new_post).execute(conn)?;
    let post_id = select(last_insert_rowid).get_result::<i64>(conn)?;

    debug!(post_id, author_id = author, "inserted post");
    Ok(post_id)
}

pub fn get_post(conn: &SqliteConnection, post_id: i64) -> Result<Post> {
    posts
        .find(post_id)
        .first::<Post>(conn)
        .optional()?
        .ok_or_else(|| Error::post_not_found(post_id))
}

/// Loads a post, failing with `Forbidden` unless `user` wrote it.
pub fn get_owned_post(conn: &SqliteConnection, post_id: i64, user: i64) -> Result<Post> {
    let post = get_post(conn, post_id)?;
    if post.author_id != user {
        warn!(
            post_id,
            user_id = user,
            author_id = post.author_id,
            "post belongs to another user"
        );
        return Err(Error::Forbidden {
            post_id,
            user_id: user,
        });
    }
    Ok(post)
}

/// Applies `changes` and refreshes `updated_at`, returning the stored row.
pub fn update_post(conn: &SqliteConnection, post_id: i64, changes: &PostChanges) -> Result<Post> {
    let now = Utc::now().naive_utc();
    let touched = update(posts.find(post_id))
        .set((changes, updated_at.eq(now)))
        .execute(conn)?;
    if touched == 0 {
        return Err(Error::post_not_found(post_id));
    }

    debug!(post_id, "updated post");
    get_post(conn, post_id)
}

pub fn delete_post(conn: &SqliteConnection, post_id: i64) -> Result<()> {
    match delete(posts.find(post_id)).execute(conn)? {
        0 => Err(Error::post_not_found(post_id)),
        _ => {
            debug!(post_id, "deleted post");
            Ok(())
        }
    }
}

pub fn delete_all_by_author(conn: &SqliteConnection, author: i64) -> Result<usize> {
    let removed = delete(posts.filter(author_id.eq(author))).execute(conn)?;
    debug!(author_id = author, removed, "deleted posts by author");
    Ok(removed)
}

pub fn list_recent(conn: &SqliteConnection, limit: i64, offset: i64) -> Result<Page> {
    let limit = limit.max(0);
    let offset = offset.max(0);
    let page = posts
        .order((created_at.desc(), id.desc()))
        .limit(limit)
        .offset(offset)
        .load::<Post>(conn)?;

    Ok(Page {
        posts: page,
        total: count_posts(conn)?,
        limit,
        offset,
    })
}

pub fn list_by_author(conn: &SqliteConnection, author: &User) -> Result<Vec<Post>> {
    Ok(Post::belonging_to(author)
        .order((created_at.desc(), id.desc()))
        .load(conn)?)
}

pub fn count_posts(conn: &SqliteConnection) -> Result<u64> {
    let total: i64 = posts.count().get_result(conn)?;
    Ok(total as u64)
}
