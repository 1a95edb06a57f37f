//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dtos::health::HealthResponse;
use crate::dtos::product::{MessageResponse, ProductPayload, ProductResponse};
use crate::handlers::{health, product};

#[derive(OpenApi)]
#[openapi(
    paths(
        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,
        health::health_check,
    ),
    components(schemas(ProductPayload, ProductResponse, MessageResponse, HealthResponse)),
    tags(
        (name = "Products", description = "Product CRUD"),
        (name = "Utility", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Interactive UI at `/apidocs`, backed by the JSON document at `/apispec.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/apidocs").url("/apispec.json", ApiDoc::openapi())
}
