mod common;

use blog_store::Error;
use proptest::prelude::*;

use common::open_store;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8),
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..4u8, 0..4u8).prop_map(|(name, mail)| Op::Insert(name, mail)),
        1 => (0..8usize).prop_map(Op::Delete),
    ]
}

struct Live {
    id: i64,
    username: String,
    email: String,
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn live_users_never_share_username_or_email(ops in prop::collection::vec(op(), 1..24)) {
        let store = open_store();
        let mut live: Vec<Live> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(name, mail) => {
                    let username = format!("user{}", name);
                    let email = format!("u{}@x.com", mail);
                    let clash = live
                        .iter()
                        .any(|u| u.username == username || u.email == email);

                    match store.users().insert(&username, &email, "h") {
                        Ok(id) => {
                            prop_assert!(!clash);
                            live.push(Live { id, username, email });
                        }
                        Err(Error::UniqueConstraintViolation { .. }) => prop_assert!(clash),
                        Err(e) => panic!("unexpected {:?}", e),
                    }
                }
                Op::Delete(n) => {
                    if !live.is_empty() {
                        let gone = live.remove(n % live.len());
                        store.users().delete(gone.id).unwrap();
                    }
                }
            }
        }

        prop_assert_eq!(store.users().count().unwrap(), live.len() as u64);
        for user in &live {
            let stored = store.users().find_by_username(&user.username).unwrap().unwrap();
            prop_assert_eq!(stored.id, user.id);
            prop_assert_eq!(&stored.email, &user.email);
        }
    }
}
