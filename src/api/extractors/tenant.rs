use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AppError;
use crate::state::AppState;

/// Validated `{tenant_id}` path segment. Extraction fails with a 404 when
/// no such tenant exists, so handlers never see an unknown tenant id.
pub struct TenantId(pub String);

impl FromRequestParts<Arc<AppState>> for TenantId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation("Missing tenant id".into()))?;

        let tenant_id = params
            .get("tenant_id")
            .ok_or(AppError::Validation("Missing tenant id".into()))?;

        match state.tenant_repo.find_by_id(tenant_id).await? {
            Some(_) => Ok(TenantId(tenant_id.clone())),
            None => Err(AppError::NotFound("Tenant not found".into())),
        }
    }
}
