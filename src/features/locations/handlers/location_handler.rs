use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::locations::dtos::{
    LocationIdsDto, ResolveLocationRequestDto, ResolvedLocationDto,
};
use crate::features::locations::services::LocationResolver;
use crate::shared::types::ApiResponse;

/// Resolve free-text location input
///
/// Accepts IDs, exact names, or partial names per level and returns the
/// canonical, consistent path. Ambiguous, unknown, or conflicting input is
/// rejected with a message naming the offending level.
#[utoipa::path(
    post,
    path = "/api/locations/resolve",
    request_body = ResolveLocationRequestDto,
    responses(
        (status = 200, description = "Resolved location", body = ApiResponse<ResolvedLocationDto>),
        (status = 400, description = "Unknown, ambiguous, or inconsistent location")
    ),
    tag = "locations"
)]
pub async fn resolve_location(
    State(resolver): State<Arc<LocationResolver>>,
    AppJson(dto): AppJson<ResolveLocationRequestDto>,
) -> Result<Json<ApiResponse<ResolvedLocationDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let resolved = resolver.resolve(&dto.into()).await?;
    Ok(Json(ApiResponse::ok(resolved.into())))
}

/// Validate a set of location IDs
///
/// Derives the canonical path from the most specific ID and rejects any
/// supplied parent ID that disagrees with it.
#[utoipa::path(
    post,
    path = "/api/locations/validate",
    request_body = LocationIdsDto,
    responses(
        (status = 200, description = "Canonical location", body = ApiResponse<ResolvedLocationDto>),
        (status = 400, description = "Unknown or inconsistent location IDs")
    ),
    tag = "locations"
)]
pub async fn validate_location(
    State(resolver): State<Arc<LocationResolver>>,
    AppJson(dto): AppJson<LocationIdsDto>,
) -> Result<Json<ApiResponse<ResolvedLocationDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let resolved = resolver.resolve_hierarchy(&dto.into()).await?;
    Ok(Json(ApiResponse::ok(resolved.into())))
}
