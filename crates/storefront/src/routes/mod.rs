//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Product listing (clears checkout state)
//! GET  /health            - Health check
//! GET  /health/ready      - Readiness check (probes the catalog)
//!
//! # Checkout
//! GET  /checkout/{id}     - Checkout page for one product
//! POST /checkout/{id}     - Place order (validate, email, redirect)
//! GET  /thank-you         - Order confirmation (requires purchase flag)
//!
//! # API
//! POST /api/orders        - JSON order notification endpoint
//! ```

pub mod api;
pub mod checkout;
pub mod home;
pub mod thank_you;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(checkout::show).post(checkout::place_order))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/orders", post(api::orders::send))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Checkout routes
        .nest("/checkout", checkout_routes())
        // Order confirmation
        .route("/thank-you", get(thank_you::show))
        // JSON API
        .nest("/api", api_routes())
}
