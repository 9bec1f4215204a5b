//! PostgreSQL customer store over a shared `PgPool`.

use super::CustomerDao;
use crate::error::AppError;
use crate::model::{Customer, CustomerChanges, NewCustomer};
use crate::sql;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct PgCustomerDao {
    pool: PgPool,
}

impl PgCustomerDao {
    pub fn new(pool: PgPool) -> Self {
        PgCustomerDao { pool }
    }
}

/// Row mapper: `id, name, email, age` columns into a [`Customer`].
pub fn map_customer_row(row: &PgRow) -> Result<Customer, sqlx::Error> {
    Ok(Customer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        age: row.try_get("age")?,
    })
}

/// The email UNIQUE constraint catches writers that raced past the service's exists check.
fn conflict_on_unique_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            tracing::warn!(constraint = ?db_err.constraint(), "unique violation on customer write");
            return AppError::Conflict("email already taken".into());
        }
    }
    AppError::Db(err)
}

#[async_trait]
impl CustomerDao for PgCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, AppError> {
        let q = sql::select_all();
        tracing::debug!(sql = %q, "query");
        let rows = sqlx::query(&q).fetch_all(&self.pool).await?;
        let customers = rows
            .iter()
            .map(map_customer_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }

    async fn select_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let q = sql::select_by_id();
        tracing::debug!(sql = %q, id, "query");
        let row = sqlx::query(&q).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(map_customer_row).transpose()?)
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, AppError> {
        let q = sql::exists_by_email();
        tracing::debug!(sql = %q, "query");
        let (exists,): (bool,) = sqlx::query_as(&q).bind(email).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn exists_customer_with_id(&self, id: i64) -> Result<bool, AppError> {
        let q = sql::exists_by_id();
        tracing::debug!(sql = %q, id, "query");
        let (exists,): (bool,) = sqlx::query_as(&q).bind(id).fetch_one(&self.pool).await?;
        Ok(exists)
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<i64, AppError> {
        let q = sql::insert();
        tracing::debug!(sql = %q, "query");
        let (id,): (i64,) = sqlx::query_as(&q)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(customer.age)
            .fetch_one(&self.pool)
            .await
            .map_err(conflict_on_unique_violation)?;
        Ok(id)
    }

    async fn update_customer(&self, changes: &CustomerChanges) -> Result<(), AppError> {
        let Some(q) = sql::update(changes) else {
            return Ok(());
        };
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        sql::bind_all(sqlx::query(&q.sql), &q.params)
            .execute(&self.pool)
            .await
            .map_err(conflict_on_unique_violation)?;
        Ok(())
    }

    async fn delete_customer_by_id(&self, id: i64) -> Result<(), AppError> {
        let q = sql::delete_by_id();
        tracing::debug!(sql = %q, id, "query");
        sqlx::query(&q).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
