//! Customer record and the request shapes that create or change it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// A customer that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub age: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRegistrationRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<CustomerRegistrationRequest> for NewCustomer {
    fn from(req: CustomerRegistrationRequest) -> Self {
        NewCustomer {
            name: req.name,
            email: req.email,
            age: req.age,
        }
    }
}

/// Partial update body. A missing field and an explicit `null` both mean "leave as is".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

/// Columns to write for one customer. Only fields that differ from the stored row are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerChanges {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl CustomerChanges {
    pub fn new(id: i64) -> Self {
        CustomerChanges {
            id,
            name: None,
            email: None,
            age: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }

    pub fn apply_to(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name = name.clone();
        }
        if let Some(email) = &self.email {
            customer.email = email.clone();
        }
        if let Some(age) = self.age {
            customer.age = age;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_treats_null_and_missing_alike() {
        let req: CustomerUpdateRequest =
            serde_json::from_str(r#"{"name": null, "age": 31}"#).unwrap();
        assert!(req.name.is_none());
        assert!(req.email.is_none());
        assert_eq!(req.age, Some(31));
    }

    #[test]
    fn changes_touch_only_staged_fields() {
        let mut customer = Customer {
            id: 7,
            name: "Alice".into(),
            email: "a@x.com".into(),
            age: 30,
        };
        let mut changes = CustomerChanges::new(7);
        assert!(changes.is_empty());
        changes.age = Some(31);
        assert!(!changes.is_empty());

        changes.apply_to(&mut customer);
        assert_eq!(customer.name, "Alice");
        assert_eq!(customer.email, "a@x.com");
        assert_eq!(customer.age, 31);
    }
}
