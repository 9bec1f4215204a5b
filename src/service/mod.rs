//! CustomerService: business rules over the customer store.

mod customer;
mod validation;
pub use customer::CustomerService;
pub use validation::RequestValidator;
