//! Typed values bound to customer statements.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;

/// A value that can be bound to a customer statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Int(i32),
    BigInt(i64),
}

/// Bind params in order, so `$1` gets `params[0]`.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::Text(s) => query.bind(s.as_str()),
            SqlParam::Int(n) => query.bind(*n),
            SqlParam::BigInt(n) => query.bind(*n),
        };
    }
    query
}
