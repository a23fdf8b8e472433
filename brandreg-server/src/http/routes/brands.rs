//! Brand endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Deserializer, Serialize};

use crate::db::repos::{Brand, BrandRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryParams, ValidBrandId};
use crate::http::server::AppState;
use crate::models::{BrandChanges, BrandStatus, NewBrand, Paginated, Pagination, PaginationParams};

/// Create brand request
#[derive(Deserialize)]
pub struct CreateBrandRequest {
    pub brand: String,
    pub holder: String,
    /// May be omitted (defaults to pending) but not null.
    #[serde(default, deserialize_with = "present_string")]
    pub status: Option<String>,
}

fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Update brand request; omitted fields keep their stored value
#[derive(Deserialize, Default)]
pub struct UpdateBrandRequest {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub holder: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Brand response
#[derive(Debug, Serialize)]
pub struct BrandResponse {
    pub id: i64,
    pub brand: String,
    pub holder: String,
    pub status: BrandStatus,
    pub created_at: String,
}

impl From<Brand> for BrandResponse {
    fn from(b: Brand) -> Self {
        Self {
            id: b.id,
            brand: b.brand,
            holder: b.holder,
            status: b.status,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// GET /brands - list brands with pagination
async fn list_brands(
    State(state): State<Arc<AppState>>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> Result<Json<Paginated<BrandResponse>>, ApiError> {
    let page = Pagination::from(params);
    let result = BrandRepo::new(&state.store).list(page).await?;

    Ok(Json(result.map(BrandResponse::from)))
}

/// POST /brands - register a new brand
async fn create_brand(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateBrandRequest>,
) -> Result<(StatusCode, Json<BrandResponse>), ApiError> {
    let new = NewBrand::new(&req.brand, &req.holder, req.status.as_deref())?;
    let brand = BrandRepo::new(&state.store).create(new).await?;

    Ok((StatusCode::CREATED, Json(BrandResponse::from(brand))))
}

/// GET /brands/{id} - get a single brand
async fn get_brand(
    State(state): State<Arc<AppState>>,
    ValidBrandId(id): ValidBrandId,
) -> Result<Json<BrandResponse>, ApiError> {
    let brand = BrandRepo::new(&state.store).get(id).await?;
    Ok(Json(BrandResponse::from(brand)))
}

/// PUT /brands/{id} - overwrite the supplied fields
async fn update_brand(
    State(state): State<Arc<AppState>>,
    ValidBrandId(id): ValidBrandId,
    JsonBody(req): JsonBody<UpdateBrandRequest>,
) -> Result<Json<BrandResponse>, ApiError> {
    let changes = BrandChanges::new(
        req.brand.as_deref(),
        req.holder.as_deref(),
        req.status.as_deref(),
    )?;
    let brand = BrandRepo::new(&state.store).update(id, changes).await?;
    Ok(Json(BrandResponse::from(brand)))
}

/// DELETE /brands/{id}
async fn delete_brand(
    State(state): State<Arc<AppState>>,
    ValidBrandId(id): ValidBrandId,
) -> Result<StatusCode, ApiError> {
    BrandRepo::new(&state.store).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Brand routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/brands", get(list_brands).post(create_brand))
        .route(
            "/brands/{id}",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
}
