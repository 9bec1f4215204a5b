//! Shared application state for all routes.

use crate::service::CustomerService;

#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
}

impl AppState {
    pub fn new(customers: CustomerService) -> Self {
        AppState { customers }
    }
}
