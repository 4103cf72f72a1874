use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateTenantRequest, UpdateTenantRequest};
use crate::api::extractors::tenant::TenantId;
use crate::domain::models::tenant::Tenant;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_tenant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Tenant name is required".into()));
    }
    if payload.slug.trim().is_empty() {
        return Err(AppError::Validation("Tenant slug is required".into()));
    }

    let mut tenant = Tenant::new(payload.name, payload.slug);
    tenant.contact_email = payload.contact_email;
    tenant.logo_url = payload.logo_url;

    let created = state.tenant_repo.create(&tenant).await?;
    info!("Tenant created: {}", created.id);

    Ok(Json(created))
}

pub async fn get_tenant_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;

    Ok(Json(tenant))
}

pub async fn update_tenant(
    State(state): State<Arc<AppState>>,
    TenantId(tenant_id): TenantId,
    Json(payload): Json<UpdateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut tenant = state.tenant_repo.find_by_id(&tenant_id).await?
        .ok_or(AppError::NotFound("Tenant not found".into()))?;

    if let Some(name) = payload.name {
        tenant.name = name;
    }
    if let Some(email) = payload.contact_email {
        tenant.contact_email = Some(email);
    }
    if let Some(logo) = payload.logo_url {
        tenant.logo_url = Some(logo);
    }

    let updated = state.tenant_repo.update(&tenant).await?;
    info!("Tenant updated: {}", tenant_id);
    Ok(Json(updated))
}
