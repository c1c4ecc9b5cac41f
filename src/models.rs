use chrono::NaiveDateTime;

use crate::db::schema::{posts, users};

#[derive(Queryable, Identifiable, PartialEq, Eq, Clone, Debug, Serialize)]
#[table_name = "users"]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Associations, PartialEq, Eq, Clone, Debug, Serialize)]
#[belongs_to(User, foreign_key = "author_id")]
#[table_name = "posts"]
pub struct Post {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "posts"]
pub struct NewPost<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub author_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Fields a post update may touch.
///
/// `None` leaves a column alone, `Some(None)` clears it.
#[derive(AsChangeset, Default, Clone, Debug)]
#[table_name = "posts"]
pub struct PostChanges {
    pub title: Option<Option<String>>,
    pub content: Option<Option<String>>,
}

impl PostChanges {
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    pub fn content<S: Into<String>>(mut self, content: S) -> Self {
        self.content = Some(Some(content.into()));
        self
    }

    pub fn clear_title(mut self) -> Self {
        self.title = Some(None);
        self
    }

    pub fn clear_content(mut self) -> Self {
        self.content = Some(None);
        self
    }
}

/// One page of posts, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub posts: Vec<Post>,
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
}
