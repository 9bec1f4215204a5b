//! Builds the SELECT, INSERT, UPDATE and DELETE statements the store issues.

use super::params::SqlParam;
use crate::model::CustomerChanges;

pub const CUSTOMER_TABLE: &str = "customer";

const COLUMNS: &str = "id, name, email, age";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// DDL for the customer table. Idempotent; email uniqueness is enforced by the database too.
pub fn create_table() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            age INT NOT NULL
        )
        "#,
        CUSTOMER_TABLE
    )
}

pub fn select_all() -> String {
    format!("SELECT {} FROM {} ORDER BY id", COLUMNS, CUSTOMER_TABLE)
}

/// Caller binds the id as `$1`.
pub fn select_by_id() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, CUSTOMER_TABLE)
}

pub fn exists_by_email() -> String {
    format!("SELECT EXISTS(SELECT 1 FROM {} WHERE email = $1)", CUSTOMER_TABLE)
}

pub fn exists_by_id() -> String {
    format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", CUSTOMER_TABLE)
}

/// Caller binds name, email, age. Returns the generated id.
pub fn insert() -> String {
    format!(
        "INSERT INTO {} (name, email, age) VALUES ($1, $2, $3) RETURNING id",
        CUSTOMER_TABLE
    )
}

pub fn delete_by_id() -> String {
    format!("DELETE FROM {} WHERE id = $1", CUSTOMER_TABLE)
}

/// UPDATE by id: SET only the columns carried by `changes`. `None` when there is nothing to write.
pub fn update(changes: &CustomerChanges) -> Option<QueryBuf> {
    if changes.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = &changes.name {
        let n = q.push_param(SqlParam::Text(name.clone()));
        sets.push(format!("name = ${}", n));
    }
    if let Some(email) = &changes.email {
        let n = q.push_param(SqlParam::Text(email.clone()));
        sets.push(format!("email = ${}", n));
    }
    if let Some(age) = changes.age {
        let n = q.push_param(SqlParam::Int(age));
        sets.push(format!("age = ${}", n));
    }
    let id_param = q.push_param(SqlParam::BigInt(changes.id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE id = ${}",
        CUSTOMER_TABLE,
        sets.join(", "),
        id_param
    );
    Some(q)
}
