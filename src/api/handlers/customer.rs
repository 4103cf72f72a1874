use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::customer::Customer;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Customer name is required".into()));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AppError::Validation("A valid customer email is required".into()));
    }

    let mut customer = Customer::new(tenant_id.clone(), payload.name, payload.email);
    customer.phone = payload.phone;
    customer.notes = payload.notes;

    let created = state.customer_repo.create(&customer).await?;
    info!("Customer created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let search = params.get("q").map(|s| s.as_str());
    let customers = state.customer_repo.list(&tenant_id, search).await?;
    Ok(Json(customers))
}

pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, customer_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state.customer_repo.find_by_id(&tenant_id, &customer_id).await?
        .ok_or(AppError::NotFound("Customer not found".into()))?;
    Ok(Json(customer))
}

pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, customer_id)): Path<(String, String)>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut customer = state.customer_repo.find_by_id(&tenant_id, &customer_id).await?
        .ok_or(AppError::NotFound("Customer not found".into()))?;

    if let Some(val) = payload.name {
        if val.trim().is_empty() {
            return Err(AppError::Validation("Customer name is required".into()));
        }
        customer.name = val;
    }
    if let Some(val) = payload.email {
        if val.trim().is_empty() || !val.contains('@') {
            return Err(AppError::Validation("A valid customer email is required".into()));
        }
        customer.email = val;
    }
    if let Some(val) = payload.phone { customer.phone = Some(val); }
    if let Some(val) = payload.notes { customer.notes = Some(val); }

    let updated = state.customer_repo.update(&customer).await?;
    info!("Customer updated: {}", customer_id);
    Ok(Json(updated))
}

pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Path((_, customer_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.customer_repo.delete(&tenant_id, &customer_id).await?;
    info!("Customer deleted: {}", customer_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
