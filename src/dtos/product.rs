// src/dtos/product.rs
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body accepted by POST and PUT.
///
/// Only used to describe the payload in the API document; incoming bodies go through
/// [`crate::validation::ProductSchema`] instead of serde so that every field error can be
/// reported at once.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[schema(min_length = 1)]
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
        }
    }
}
