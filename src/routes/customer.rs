//! Customer CRUD routes, mounted under `/api/v1` by [`app_router`](super::app_router).

use crate::handlers::customer::{
    delete_customer, get_customer, list_customers, register_customer, update_customer,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(register_customer))
        .route(
            "/customers/:customer_id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .with_state(state)
}
