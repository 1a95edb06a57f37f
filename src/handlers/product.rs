// src/handlers/product.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::dtos::product::{MessageResponse, ProductPayload, ProductResponse};
use crate::error::AppError;
use crate::events::ProductEvent;
use crate::state::AppState;
use crate::validation::FieldErrors;

// Non-numeric ids can't match a row, so they get the same 404 as unknown ones.
fn product_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(_) => Err(AppError::not_found("Product not found")),
    }
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, FieldErrors> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| FieldErrors::schema(rejection.body_text()))
}

fn reject(state: &AppState, action: &'static str, id: Option<i64>, errors: FieldErrors) -> AppError {
    state.events.record(&ProductEvent::Rejected {
        action,
        id,
        errors: errors.clone(),
    });
    AppError::validation(errors)
}

// GET /products - List all products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses((status = 200, description = "List of all products", body = [ProductResponse]))
)]
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.store.get_all().await?;
    info!(count = products.len(), "Fetched all products");

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/{id} - Get single product
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "A single product", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
#[instrument(skip_all)]
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let id = product_id(path)?;
    let product = state.store.get_by_id(id).await?;
    info!(id, "Fetched product with ID {id}");

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product added successfully", body = MessageResponse),
        (status = 400, description = "Validation error, field name to list of messages")
    )
)]
#[instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let product = match json_body(payload).and_then(|body| state.schema.load_new(&body)) {
        Ok(product) => product,
        Err(errors) => return Err(reject(&state, "adding", None, errors)),
    };

    let product = state.store.create(product).await?;
    state.events.record(&ProductEvent::Added {
        id: product.id,
        name: product.name,
    });

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Product added"))))
}

// PUT /products/{id} - Update product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, description = "Validation error, field name to list of messages"),
        (status = 404, description = "Product not found")
    )
)]
#[instrument(skip_all)]
pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = product_id(path)?;

    // Check if product exists before looking at the body
    state.store.get_by_id(id).await?;

    let changes = match json_body(payload).and_then(|body| state.schema.load_partial(&body)) {
        Ok(changes) => changes,
        Err(errors) => return Err(reject(&state, "updating", Some(id), errors)),
    };

    let product = state.store.update(id, changes).await?;
    state.events.record(&ProductEvent::Updated { id: product.id });

    Ok(Json(MessageResponse::new("Product updated")))
}

// DELETE /products/{id} - Delete product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found")
    )
)]
#[instrument(skip_all)]
pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = product_id(path)?;

    state.store.delete(id).await?;
    state.events.record(&ProductEvent::Deleted { id });

    Ok(Json(MessageResponse::new("Product deleted")))
}
