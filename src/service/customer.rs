//! Customer use cases: lookup, registration, deletion and partial update.

use super::validation::RequestValidator;
use crate::error::AppError;
use crate::model::{Customer, CustomerChanges, CustomerRegistrationRequest, CustomerUpdateRequest};
use crate::store::CustomerDao;
use std::sync::Arc;

#[derive(Clone)]
pub struct CustomerService {
    dao: Arc<dyn CustomerDao>,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("customer with id [{}] not found", id))
}

fn email_taken() -> AppError {
    AppError::Conflict("email already taken".into())
}

impl CustomerService {
    pub fn new(dao: Arc<dyn CustomerDao>) -> Self {
        CustomerService { dao }
    }

    pub async fn get_all_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.dao.select_all_customers().await
    }

    pub async fn get_customer(&self, id: i64) -> Result<Customer, AppError> {
        self.dao
            .select_customer_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Register a customer and return its new id. Fails with `Conflict` if the email is in use.
    pub async fn add_customer(&self, request: CustomerRegistrationRequest) -> Result<i64, AppError> {
        RequestValidator::validate_registration(&request)?;
        if self.dao.exists_customer_with_email(&request.email).await? {
            return Err(email_taken());
        }
        let id = self.dao.insert_customer(request.into()).await?;
        tracing::info!(customer_id = id, "customer registered");
        Ok(id)
    }

    pub async fn delete_customer_by_id(&self, id: i64) -> Result<(), AppError> {
        if !self.dao.exists_customer_with_id(id).await? {
            return Err(not_found(id));
        }
        self.dao.delete_customer_by_id(id).await?;
        tracing::info!(customer_id = id, "customer deleted");
        Ok(())
    }

    /// Apply the supplied fields that differ from the stored customer.
    /// A missing id is `NotFound` before the body is checked; nothing different to
    /// write is a `Validation` error.
    pub async fn update_customer_by_id(
        &self,
        id: i64,
        request: CustomerUpdateRequest,
    ) -> Result<(), AppError> {
        let customer = self.get_customer(id).await?;
        RequestValidator::validate_update(&request)?;
        let mut changes = CustomerChanges::new(id);

        if let Some(name) = request.name.filter(|n| *n != customer.name) {
            changes.name = Some(name);
        }
        if let Some(age) = request.age.filter(|a| *a != customer.age) {
            changes.age = Some(age);
        }
        if let Some(email) = request.email.filter(|e| *e != customer.email) {
            if self.dao.exists_customer_with_email(&email).await? {
                return Err(email_taken());
            }
            changes.email = Some(email);
        }

        if changes.is_empty() {
            return Err(AppError::Validation("no data changes found".into()));
        }
        self.dao.update_customer(&changes).await?;
        tracing::info!(
            customer_id = id,
            name = changes.name.is_some(),
            email = changes.email.is_some(),
            age = changes.age.is_some(),
            "customer updated"
        );
        Ok(())
    }

    /// Round trip to the store; used by the readiness route.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.dao.ping().await
    }
}
