table! {
    users (id) {
        id -> BigInt,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamp,
    }
}

table! {
    posts (id) {
        id -> BigInt,
        title -> Nullable<Text>,
        content -> Nullable<Text>,
        author_id -> BigInt,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

joinable!(posts -> users (author_id));

allow_tables_to_appear_in_same_query!(posts, users);
