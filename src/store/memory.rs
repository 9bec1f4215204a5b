//! In-process customer store for tests and database-free runs.

use super::CustomerDao;
use crate::error::AppError;
use crate::model::{Customer, CustomerChanges, NewCustomer};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Rows keyed by id; ids start at 1 and are never reused. Email uniqueness is
/// enforced the way the database constraint would.
#[derive(Default)]
pub struct InMemoryCustomerDao {
    inner: Mutex<Rows>,
}

#[derive(Default)]
struct Rows {
    by_id: BTreeMap<i64, Customer>,
    last_id: i64,
}

impl Rows {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.by_id
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }
}

impl InMemoryCustomerDao {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, Rows> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl CustomerDao for InMemoryCustomerDao {
    async fn select_all_customers(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.rows().by_id.values().cloned().collect())
    }

    async fn select_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.rows().by_id.get(&id).cloned())
    }

    async fn exists_customer_with_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.rows().email_taken(email, None))
    }

    async fn exists_customer_with_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.rows().by_id.contains_key(&id))
    }

    async fn insert_customer(&self, customer: NewCustomer) -> Result<i64, AppError> {
        let mut rows = self.rows();
        if rows.email_taken(&customer.email, None) {
            return Err(AppError::Conflict("email already taken".into()));
        }
        rows.last_id += 1;
        let id = rows.last_id;
        rows.by_id.insert(
            id,
            Customer {
                id,
                name: customer.name,
                email: customer.email,
                age: customer.age,
            },
        );
        Ok(id)
    }

    async fn update_customer(&self, changes: &CustomerChanges) -> Result<(), AppError> {
        let mut rows = self.rows();
        if let Some(email) = &changes.email {
            if rows.email_taken(email, Some(changes.id)) {
                return Err(AppError::Conflict("email already taken".into()));
            }
        }
        if let Some(customer) = rows.by_id.get_mut(&changes.id) {
            changes.apply_to(customer);
        }
        Ok(())
    }

    async fn delete_customer_by_id(&self, id: i64) -> Result<(), AppError> {
        self.rows().by_id.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            name: "Alice".into(),
            email: email.into(),
            age: 30,
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_and_not_reused() {
        let dao = InMemoryCustomerDao::new();
        let first = dao.insert_customer(new_customer("a@x.com")).await.unwrap();
        dao.delete_customer_by_id(first).await.unwrap();
        let second = dao.insert_customer(new_customer("a@x.com")).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let dao = InMemoryCustomerDao::new();
        dao.insert_customer(new_customer("a@x.com")).await.unwrap();
        let err = dao.insert_customer(new_customer("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(dao.select_all_customers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_are_noops() {
        let dao = InMemoryCustomerDao::new();
        let mut changes = CustomerChanges::new(99);
        changes.age = Some(1);
        dao.update_customer(&changes).await.unwrap();
        dao.delete_customer_by_id(99).await.unwrap();
        assert!(dao.select_all_customers().await.unwrap().is_empty());
    }
}
