//! SQLite storage for users and their posts.
//!
//! Deleting a user deletes its posts in the same transaction, and a post
//! can only be inserted for a user that exists.

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;
#[macro_use]
extern crate serde_derive;

pub mod config;
pub mod db;
pub mod error;
pub mod integrity;
pub mod logging;
pub mod models;
pub mod operations;
pub mod store;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::models::{Page, Post, PostChanges, User};
pub use crate::store::{PostStore, Store, UserStore};
