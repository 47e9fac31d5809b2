use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
    ),
    components(
        schemas(
            // Shared
            Meta,
            ApiResponse<categories_dtos::CategoryDto>,
            ApiResponse<Vec<categories_dtos::CategoryDto>>,
            ApiResponse<bool>,
            // Categories
            categories_dtos::CategoryDto,
            categories_dtos::CategoryCreateUpdateDto,
        )
    ),
    tags(
        (name = "categories", description = "Category management"),
    ),
    info(
        title = "Category API",
        version = "0.1.0",
        description = "API documentation for the category service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
