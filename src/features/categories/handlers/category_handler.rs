use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::categories::dtos::{CategoryCreateUpdateDto, CategoryDto};
use crate::features::categories::services::CategoryService;
use crate::shared::types::{ApiResponse, Meta};

/// Query params for deleting a category
#[derive(Debug, Deserialize)]
pub struct DeleteCategoryQuery {
    /// If true, mark the row deleted instead of removing it. Default: false (hard delete)
    #[serde(default)]
    pub soft: bool,
}

/// List all categories
///
/// Soft-deleted categories are included in the listing.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = ApiResponse<Vec<CategoryDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>> {
    let categories = service.find_all().await?;
    let total = categories.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CategoryDto>>> {
    let category = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryCreateUpdateDto,
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Category with the same name already exists")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CategoryCreateUpdateDto>,
) -> Result<Json<ApiResponse<CategoryDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Update an existing category
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = CategoryCreateUpdateDto,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category with the same name already exists")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CategoryCreateUpdateDto>,
) -> Result<Json<ApiResponse<CategoryDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}

/// Delete a category (hard delete by default, soft delete via `soft=true`)
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        ("soft" = Option<bool>, Query, description = "Soft delete if true")
    ),
    responses(
        (status = 200, description = "Category deleted successfully", body = ApiResponse<bool>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteCategoryQuery>,
) -> Result<Json<ApiResponse<bool>>> {
    let deleted = service.delete(id, query.soft).await?;
    Ok(Json(ApiResponse::success(Some(deleted), None, None)))
}
