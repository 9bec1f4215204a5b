//! Customer API: REST service for customer records backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest};
pub use routes::{app_router, common_routes_with_ready, customer_routes};
pub use service::CustomerService;
pub use state::AppState;
pub use store::{
    ensure_customer_table, ensure_database_exists, CustomerDao, InMemoryCustomerDao, PgCustomerDao,
};
