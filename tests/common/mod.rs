use std::ops::Deref;

use blog_store::{Config, Store};
use tempfile::TempDir;

/// A store backed by a database file that lives as long as the value.
pub struct TestStore {
    store: Store,
    _dir: TempDir,
}

impl Deref for TestStore {
    type Target = Store;

    fn deref(&self) -> &Store {
        &self.store
    }
}

pub fn open_store() -> TestStore {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blog.db");
    let config = Config::new(path.to_str().unwrap());
    TestStore {
        store: Store::open(&config).unwrap(),
        _dir: dir,
    }
}

#[allow(dead_code)]
pub fn insert_alice(store: &Store) -> i64 {
    store
        .users()
        .insert("alice", "a@x.com", "$argon2id$v=19$opaque")
        .unwrap()
}
