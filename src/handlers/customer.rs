//! Customer handlers: list, read, register, update, delete.

use crate::error::AppError;
use crate::model::{Customer, CustomerRegistrationRequest, CustomerUpdateRequest};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid customer id '{}'", id_str)))
}

/// Any body rejection (bad syntax, missing content type) is a `BadRequest`.
fn parse_body<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if !body.is_object() {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    }
    serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))
}

pub async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state.customers.get_all_customers().await?;
    Ok(Json(customers))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let id = parse_id(&customer_id)?;
    let customer = state.customers.get_customer(id).await?;
    Ok(Json(customer))
}

pub async fn register_customer(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let request: CustomerRegistrationRequest = parse_body(payload)?;
    state.customers.add_customer(request).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&customer_id)?;
    let request: CustomerUpdateRequest = parse_body(payload)?;
    state.customers.update_customer_by_id(id, request).await?;
    Ok(StatusCode::OK)
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&customer_id)?;
    state.customers.delete_customer_by_id(id).await?;
    Ok(StatusCode::OK)
}
