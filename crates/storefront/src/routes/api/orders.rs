//! JSON order notification endpoint.
//!
//! `POST /api/orders` accepts a customer + product payload and dispatches
//! the confirmation email. The total is recomputed server-side from the
//! product price; the client-supplied total is ignored.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use esales_mart_core::Email;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::types::Product;
use crate::services::OrderConfirmation;
use crate::state::AppState;

/// Order notification request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNotificationRequest {
    pub name: String,
    pub email: String,
    pub product: Product,
    pub quantity: u32,
    /// Accepted for wire compatibility; the server recomputes the total.
    #[serde(default)]
    pub total_price: Option<Decimal>,
}

/// Order notification response body.
#[derive(Debug, Serialize)]
pub struct OrderNotificationResponse {
    pub message: String,
}

fn respond(status: StatusCode, message: &str) -> (StatusCode, Json<OrderNotificationResponse>) {
    (
        status,
        Json(OrderNotificationResponse {
            message: message.to_string(),
        }),
    )
}

/// Send an order confirmation email.
///
/// Returns 200 `{"message": "Email sent successfully"}` when the relay
/// accepts the message, 500 `{"message": "Email not sent"}` on any
/// delivery failure, and 400 for malformed input.
#[instrument(skip(state, request), fields(product_id = %request.product.id, quantity = request.quantity))]
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<OrderNotificationRequest>,
) -> impl IntoResponse {
    let email = request.email.trim().to_lowercase();
    let Ok(email) = Email::parse(&email) else {
        return respond(StatusCode::BAD_REQUEST, "Invalid email address");
    };

    if request.name.trim().is_empty() {
        return respond(StatusCode::BAD_REQUEST, "Name is required");
    }

    if request.quantity == 0 {
        return respond(StatusCode::BAD_REQUEST, "Quantity is not available");
    }

    let unit_price = request.product.unit_price();
    let total = unit_price.total(request.quantity);
    let unit_display = unit_price.display();
    let total_display = total.display();

    let confirmation = OrderConfirmation {
        name: request.name.trim(),
        product_title: &request.product.title,
        product_thumbnail: &request.product.thumbnail,
        quantity: request.quantity,
        unit_price: &unit_display,
        total_price: &total_display,
        shipping_information: &request.product.shipping_information,
        return_policy: &request.product.return_policy,
    };

    match state
        .orders()
        .email()
        .send_order_confirmation(email.as_str(), &confirmation)
        .await
    {
        Ok(()) => respond(StatusCode::OK, "Email sent successfully"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to send order email");
            respond(StatusCode::INTERNAL_SERVER_ERROR, "Email not sent")
        }
    }
}
