use chrono::Utc;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::{delete, insert_into, select};
use tracing::{debug, warn};

use super::last_insert_rowid;
use crate::db::schema::users::dsl::*;
use crate::error::{Error, Result};
use crate::models::{NewUser, User};

/// Inserts a user after checking both unique columns, returning the new id.
pub fn insert_user(
    conn: &SqliteConnection,
    new_username: &str,
    new_email: &str,
    new_password_hash: &str,
) -> Result<i64> {
    if find_by_username(conn, new_username)?.is_some() {
        warn!(username = new_username, "username already taken");
        return Err(Error::UniqueConstraintViolation {
            column: "username".to_owned(),
        });
    }
    if find_by_email(conn, new_email)?.is_some() {
        warn!(email = new_email, "email already registered");
        return Err(Error::UniqueConstraintViolation {
            column: "email".to_owned(),
        });
    }

    let new_user = NewUser {
        username: new_username,
        email: new_email,
        password_hash: new_password_hash,
        created_at: Utc::now().naive_utc(),
    };
    insert_into(users).values(&new_user).execute(conn)?;
    let user_id = select(last_insert_rowid).get_result::<i64>(conn)?;

    debug!(user_id, username = new_username, "inserted user");
    Ok(user_id)
}

pub fn get_user(conn: &SqliteConnection, user_id: i64) -> Result<User> {
    users
        .find(user_id)
        .first::<User>(conn)
        .optional()?
        .ok_or_else(|| Error::user_not_found(user_id))
}

pub fn find_by_username(conn: &SqliteConnection, name: &str) -> Result<Option<User>> {
    Ok(users.filter(username.eq(name)).first(conn).optional()?)
}

pub fn find_by_email(conn: &SqliteConnection, address: &str) -> Result<Option<User>> {
    Ok(users.filter(email.eq(address)).first(conn).optional()?)
}

pub fn user_exists(conn: &SqliteConnection, user_id: i64) -> Result<bool> {
    Ok(select(exists(users.find(user_id))).get_result(conn)?)
}

/// Removes the user row only. Dependent posts are the enforcer's job.
pub fn delete_user_row(conn: &SqliteConnection, user_id: i64) -> Result<()> {
    match delete(users.find(user_id)).execute(conn)? {
        0 => Err(Error::user_not_found(user_id)),
        _ => Ok(()),
    }
}

pub fn count_users(conn: &SqliteConnection) -> Result<u64> {
    let total: i64 = users.count().get_result(conn)?;
    Ok(total as u64)
}
