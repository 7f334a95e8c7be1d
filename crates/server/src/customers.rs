//! HTTP surface for the customer registry.
//!
//! Endpoints:
//! - `POST   /customers`      — create, 200 with the new id
//! - `PUT    /customers/{id}` — update, path id must match body id
//! - `GET    /customers`      — list all
//! - `GET    /customers/{id}` — fetch one
//! - `DELETE /customers/{id}` — remove, 204
//!
//! This layer owns everything the handlers assume already happened:
//! payload validation, positive-id checks, and the path/body id match.
//! Handler failures are mapped to status codes domain-specific first.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use cadastro_core::domain::customer::CustomerId;
use cadastro_core::errors::ServiceError;
use cadastro_core::mapping::CustomerResponse;
use cadastro_core::requests::{
    CreateCustomer, CustomerPayload, CustomerRequest, DeleteCustomer, GetCustomerById,
    ListCustomers, UpdateCustomer,
};
use cadastro_core::validation::{validate_payload, FieldError};

use crate::dispatch::{Dispatcher, RequestOutcome};

#[derive(Clone)]
pub struct CustomersState {
    dispatcher: Arc<Dispatcher>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    fn message(error: impl Into<String>) -> Self {
        Self { error: error.into(), details: None }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerBody {
    pub id: i64,
    #[serde(flatten)]
    pub payload: CustomerPayload,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .with_state(CustomersState { dispatcher })
}

fn validation_failure(errors: Vec<FieldError>) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError { error: "validation failed".to_string(), details: Some(errors) }),
    )
}

/// Map a handler failure to a status code, domain-specific variants before
/// the generic one. Internal messages pass through unsanitized.
fn service_failure(failure: ServiceError) -> (StatusCode, Json<ApiError>) {
    let status = match &failure {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::InvalidOperation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = %failure, "customer request failed unexpectedly");
    }
    (status, Json(ApiError::message(failure.to_string())))
}

fn unexpected_outcome(outcome: RequestOutcome) -> (StatusCode, Json<ApiError>) {
    error!(?outcome, "dispatcher returned an outcome the boundary cannot map");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::message("unexpected dispatch outcome")),
    )
}

fn require_positive_id(id: i64) -> Result<CustomerId, (StatusCode, Json<ApiError>)> {
    if id <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::message("Customer id must be greater than zero.")),
        ));
    }
    Ok(CustomerId(id))
}

async fn create_customer(
    State(state): State<CustomersState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<CreatedResponse>, (StatusCode, Json<ApiError>)> {
    let errors = validate_payload(&payload);
    if !errors.is_empty() {
        return Err(validation_failure(errors));
    }

    let outcome = state
        .dispatcher
        .dispatch(CustomerRequest::Create(CreateCustomer { payload }))
        .await
        .map_err(service_failure)?;

    match outcome {
        RequestOutcome::Created(id) => {
            info!(event_name = "customer.created", customer_id = %id, "customer created");
            Ok(Json(CreatedResponse {
                id: id.0,
                message: "Customer created successfully.".to_string(),
            }))
        }
        other => Err(unexpected_outcome(other)),
    }
}

async fn update_customer(
    Path(id): Path<i64>,
    State(state): State<CustomersState>,
    Json(body): Json<UpdateCustomerBody>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ApiError>)> {
    let errors = validate_payload(&body.payload);
    if !errors.is_empty() {
        return Err(validation_failure(errors));
    }

    let id = require_positive_id(id)?;
    if id.0 != body.id {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::message("Path id does not match the id in the request body.")),
        ));
    }

    let outcome = state
        .dispatcher
        .dispatch(CustomerRequest::Update(UpdateCustomer { id, payload: body.payload }))
        .await
        .map_err(service_failure)?;

    match outcome {
        RequestOutcome::Updated => {
            info!(event_name = "customer.updated", customer_id = %id, "customer updated");
            Ok(Json(MessageResponse { message: "Customer updated successfully.".to_string() }))
        }
        other => Err(unexpected_outcome(other)),
    }
}

async fn list_customers(
    State(state): State<CustomersState>,
) -> Result<Json<Vec<CustomerResponse>>, (StatusCode, Json<ApiError>)> {
    let outcome = state
        .dispatcher
        .dispatch(CustomerRequest::List(ListCustomers))
        .await
        .map_err(service_failure)?;

    match outcome {
        RequestOutcome::Customers(customers) => Ok(Json(customers)),
        other => Err(unexpected_outcome(other)),
    }
}

async fn get_customer(
    Path(id): Path<i64>,
    State(state): State<CustomersState>,
) -> Result<Json<CustomerResponse>, (StatusCode, Json<ApiError>)> {
    let id = require_positive_id(id)?;

    let outcome = state
        .dispatcher
        .dispatch(CustomerRequest::GetById(GetCustomerById { id }))
        .await
        .map_err(service_failure)?;

    match outcome {
        RequestOutcome::Customer(Some(customer)) => Ok(Json(customer)),
        // The query handler reports absence as an empty result; the
        // boundary maps it to 404.
        RequestOutcome::Customer(None) => {
            Err((StatusCode::NOT_FOUND, Json(ApiError::message("Customer not found."))))
        }
        other => Err(unexpected_outcome(other)),
    }
}

async fn delete_customer(
    Path(id): Path<i64>,
    State(state): State<CustomersState>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let id = require_positive_id(id)?;

    let outcome = state
        .dispatcher
        .dispatch(CustomerRequest::Delete(DeleteCustomer { id }))
        .await
        .map_err(service_failure)?;

    match outcome {
        RequestOutcome::Deleted => {
            info!(event_name = "customer.deleted", customer_id = %id, "customer deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        other => Err(unexpected_outcome(other)),
    }
}
