use diesel::Connection;
use tracing::info;

use crate::config::Config;
use crate::db::{self, Conn, Pool};
use crate::error::{Error, Result};
use crate::integrity;
use crate::models::{Page, Post, PostChanges, User};
use crate::operations::{posts, users};

/// A migrated database behind a connection pool.
pub struct Store {
    pool: Pool,
}

impl Store {
    /// Opens the database named by `config` and applies pending migrations.
    pub fn open(config: &Config) -> Result<Store> {
        let pool = db::init_pool(config)?;
        db::run_migrations(&*Conn::get(&pool)?)?;
        info!(url = %config.database_url, "store opened");
        Ok(Store { pool })
    }

    pub fn conn(&self) -> Result<Conn> {
        Conn::get(&self.pool)
    }

    pub fn users(&self) -> UserStore<'_> {
        UserStore { store: self }
    }

    pub fn posts(&self) -> PostStore<'_> {
        PostStore { store: self }
    }
}

pub struct UserStore<'a> {
    store: &'a Store,
}

impl<'a> UserStore<'a> {
    pub fn insert(&self, username: &str, email: &str, password_hash: &str) -> Result<i64> {
        let conn = self.store.conn()?;
        conn.immediate_transaction::<_, Error, _>(|| {
            users::insert_user(&conn, username, email, password_hash)
        })
    }

    pub fn get(&self, id: i64) -> Result<User> {
        users::get_user(&*self.store.conn()?, id)
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        users::find_by_username(&*self.store.conn()?, username)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        users::find_by_email(&*self.store.conn()?, email)
    }

    /// Deletes the user and all of its posts in one transaction.
    ///
    /// Returns the number of posts removed with the user.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let conn = self.store.conn()?;
        let removed = conn.immediate_transaction::<_, Error, _>(|| {
            users::get_user(&conn, id)?;
            let removed = integrity::cascade_user_delete(&conn, id)?;
            users::delete_user_row(&conn, id)?;
            Ok(removed)
        })?;
        info!(user_id = id, posts_removed = removed, "deleted user");
        Ok(removed)
    }

    pub fn count(&self) -> Result<u64> {
        users::count_users(&*self.store.conn()?)
    }
}

pub struct PostStore<'a> {
    store: &'a Store,
}

impl<'a> PostStore<'a> {
    /// Fails with `ForeignKeyViolation` unless `author_id` names a live user.
    pub fn insert(&self, title: Option<&str>, content: Option<&str>, author_id: i64) -> Result<i64> {
        let conn = self.store.conn()?;
        conn.immediate_transaction::<_, Error, _>(|| {
            integrity::ensure_author_exists(&conn, author_id)?;
            posts::insert_post(&conn, title, content, author_id)
        })
    }

    pub fn get(&self, id: i64) -> Result<Post> {
        posts::get_post(&*self.store.conn()?, id)
    }

    pub fn update(&self, id: i64, changes: &PostChanges) -> Result<Post> {
        let conn = self.store.conn()?;
        conn.immediate_transaction::<_, Error, _>(|| posts::update_post(&conn, id, changes))
    }

    /// `update` on behalf of `user_id`, who must be the post's author.
    pub fn update_as(&self, user_id: i64, id: i64, changes: &PostChanges) -> Result<Post> {
        let conn = self.store.conn()?;
        conn.immediate_transaction::<_, Error, _>(|| {
            posts::get_owned_post(&conn, id, user_id)?;
            posts::update_post(&conn, id, changes)
        })
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        posts::delete_post(&*self.store.conn()?, id)
    }

    /// `delete` on behalf of `user_id`, who must be the post's author.
    pub fn delete_as(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.store.conn()?;
        conn.immediate_transaction::<_, Error, _>(|| {
            posts::get_owned_post(&conn, id, user_id)?;
            posts::delete_post(&conn, id)
        })
    }

    pub fn delete_all_by_author(&self, author_id: i64) -> Result<usize> {
        posts::delete_all_by_author(&*self.store.conn()?, author_id)
    }

    /// Newest posts first, with the total post count.
    pub fn list_recent(&self, limit: i64, offset: i64) -> Result<Page> {
        let conn = self.store.conn()?;
        conn.transaction::<_, Error, _>(|| posts::list_recent(&conn, limit, offset))
    }

    /// `list_recent` with the default page size.
    pub fn first_page(&self) -> Result<Page> {
        self.list_recent(posts::DEFAULT_PAGE_LIMIT, 0)
    }

    pub fn list_by_author(&self, author_id: i64) -> Result<Vec<Post>> {
        let conn = self.store.conn()?;
        conn.transaction::<_, Error, _>(|| {
            let author = users::get_user(&conn, author_id)?;
            posts::list_by_author(&conn, &author)
        })
    }

    pub fn count(&self) -> Result<u64> {
        posts::count_posts(&*self.store.conn()?)
    }
}
