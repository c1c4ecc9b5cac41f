mod common;

use blog_store::Error;

use common::{insert_alice, open_store};

#[test]
fn insert_then_get() {
    let store = open_store();
    let id = insert_alice(&store);
    assert_eq!(id, 1);

    let user = store.users().get(id).unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.password_hash, "$argon2id$v=19$opaque");
    assert_eq!(store.users().count().unwrap(), 1);
}

#[test]
fn duplicate_username_is_rejected() {
    let store = open_store();
    let first = insert_alice(&store);

    match store.users().insert("alice", "other@x.com", "h") {
        Err(Error::UniqueConstraintViolation { column }) => assert_eq!(column, "username"),
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(store.users().get(first).unwrap().email, "a@x.com");
    assert_eq!(store.users().count().unwrap(), 1);
}

#[test]
fn duplicate_email_is_rejected() {
    let store = open_store();
    insert_alice(&store);

    match store.users().insert("bob", "a@x.com", "h") {
        Err(Error::UniqueConstraintViolation { column }) => assert_eq!(column, "email"),
        other => panic!("unexpected {:?}", other),
    }
    assert!(store.users().find_by_username("bob").unwrap().is_none());
}

#[test]
fn lookups_by_unique_columns() {
    let store = open_store();
    let id = insert_alice(&store);
    store.users().insert("bob", "b@x.com", "h").unwrap();

    assert_eq!(store.users().find_by_username("alice").unwrap().unwrap().id, id);
    assert_eq!(store.users().find_by_email("a@x.com").unwrap().unwrap().id, id);
    assert!(store.users().find_by_email("nobody@x.com").unwrap().is_none());
}

#[test]
fn missing_user() {
    let store = open_store();

    match store.users().get(42) {
        Err(Error::NotFound { entity, id }) => {
            assert_eq!(entity, "user");
            assert_eq!(id, 42);
        }
        other => panic!("unexpected {:?}", other),
    }
    match store.users().delete(42) {
        Err(Error::NotFound { .. }) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn ids_are_not_reused() {
    let store = open_store();
    insert_alice(&store);
    let bob = store.users().insert("bob", "b@x.com", "h").unwrap();
    store.users().delete(bob).unwrap();

    let carol = store.users().insert("carol", "c@x.com", "h").unwrap();
    assert!(carol > bob);
}

#[test]
fn deleted_username_can_be_taken_again() {
    let store = open_store();
    let id = insert_alice(&store);
    store.users().delete(id).unwrap();

    let again = insert_alice(&store);
    assert_ne!(again, id);
    assert_eq!(store.users().get(again).unwrap().username, "alice");
}

#[test]
fn password_hash_is_not_serialized() {
    let store = open_store();
    let user = store.users().get(insert_alice(&store)).unwrap();
    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["username"], "alice");
    assert!(json.get("password_hash").is_none());
    assert!(json["created_at"].is_string());
}
