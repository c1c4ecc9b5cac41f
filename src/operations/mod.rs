//! Single-connection queries. Callers own the transaction boundary.

pub mod posts;
pub mod users;

no_arg_sql_function!(
    last_insert_rowid,
    diesel::sql_types::BigInt,
    "Rowid of the most recent successful INSERT on this connection."
);
