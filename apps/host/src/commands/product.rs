//! # Catalog Operations
//!
//! CRUD over products and services: `add-product`, `get-products`,
//! `update-product`, `delete-product`.
//!
//! Prices cross the bridge in cents. Editing a price never rewrites past
//! bills; line items snapshot the price at sale time.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::{blank_to_none, Reply};
use crate::error::ApiError;
use crate::state::AppState;
use velvet_core::validation::{validate_description, validate_price_cents, validate_product_name};
use velvet_core::{NewProduct, Product};

// =============================================================================
// DTOs
// =============================================================================

/// Product as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            price_cents: p.price_cents,
            description: p.description,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub name: String,
    pub price_cents: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProductRequest {
    pub id: i64,
}

/// Normalizes and validates form fields into a `NewProduct`.
fn to_new_product(
    name: String,
    price_cents: i64,
    description: Option<String>,
) -> Result<NewProduct, ApiError> {
    let description = blank_to_none(description);

    validate_product_name(&name)?;
    validate_price_cents(price_cents)?;
    validate_description(description.as_deref())?;

    Ok(NewProduct {
        name: name.trim().to_string(),
        price_cents,
        description,
    })
}

// =============================================================================
// Operations
// =============================================================================

/// POST `/api/add-product`
pub async fn add_product(
    State(state): State<AppState>,
    Json(req): Json<AddProductRequest>,
) -> Result<Json<Reply<ProductDto>>, ApiError> {
    debug!(name = %req.name, price_cents = req.price_cents, "add-product command");
    let start = Instant::now();

    let new = to_new_product(req.name, req.price_cents, req.description)?;
    let product = state.db.products().insert(&new).await?;

    info!(
        id = product.id,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Product added"
    );

    Ok(Json(Reply::ok(
        "Product added successfully!",
        ProductDto::from(product),
    )))
}

/// POST `/api/get-products`
///
/// Returns the whole catalog, sorted by name for the picker.
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Reply<Vec<ProductDto>>>, ApiError> {
    debug!("get-products command");

    let products = state.db.products().list().await?;
    let dtos: Vec<ProductDto> = products.into_iter().map(ProductDto::from).collect();

    Ok(Json(Reply::ok("Products fetched successfully!", dtos)))
}

/// POST `/api/update-product`
pub async fn update_product(
    State(state): State<AppState>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Reply<ProductDto>>, ApiError> {
    debug!(id = req.id, "update-product command");
    let start = Instant::now();

    let changes = to_new_product(req.name, req.price_cents, req.description)?;
    let product = state.db.products().update(req.id, &changes).await?;

    info!(
        id = product.id,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Product updated"
    );

    Ok(Json(Reply::ok(
        "Product updated successfully!",
        ProductDto::from(product),
    )))
}

/// POST `/api/delete-product`
///
/// Line items referencing the product cascade away; their bills keep the
/// snapshotted name and price.
pub async fn delete_product(
    State(state): State<AppState>,
    Json(req): Json<DeleteProductRequest>,
) -> Result<Json<Reply<()>>, ApiError> {
    debug!(id = req.id, "delete-product command");

    state.db.products().delete(req.id).await?;

    info!(id = req.id, "Product deleted");

    Ok(Json(Reply::done("Product deleted successfully!")))
}

// =============================================================================
// Unit Tests
// =============================================================================
