//! Customer persistence: the DAO seam, its implementations, and database bootstrap.

mod memory;
mod postgres;

pub use memory::InMemoryCustomerDao;
pub use postgres::{map_customer_row, PgCustomerDao};

use crate::error::AppError;
use crate::model::{Customer, CustomerChanges, NewCustomer};
use crate::sql;
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Single-row customer statements. Existence checks are the caller's job;
/// `update_customer` and `delete_customer_by_id` on a missing id change nothing.
#[async_trait]
pub trait CustomerDao: Send + Sync {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, AppError>;
    async fn select_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;
    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, AppError>;
    async fn exists_customer_with_id(&self, id: i64) -> Result<bool, AppError>;
    /// Insert and return the generated id.
    async fn insert_customer(&self, customer: NewCustomer) -> Result<i64, AppError>;
    async fn update_customer(&self, changes: &CustomerChanges) -> Result<(), AppError>;
    async fn delete_customer_by_id(&self, id: i64) -> Result<(), AppError>;
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Create the customer table if it does not exist.
pub async fn ensure_customer_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(&sql::create_table()).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_connect_options(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the target
/// database name. A URL without a database falls back to the user name, as libpq does.
fn admin_connect_options(database_url: &str) -> Result<(PgConnectOptions, String), AppError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = opts
        .get_database()
        .unwrap_or_else(|| opts.get_username())
        .to_string();
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
