//! Thank-you (order confirmation) route handler.
//!
//! Renders only when the session records a completed purchase; otherwise
//! redirects to the home page without leaking any order details.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use esales_mart_core::{CurrencyCode, Price};
use tower_sessions::Session;
use tracing::instrument;

use crate::checkout::{OrderDraft, draft};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Confirmed order display data.
#[derive(Clone)]
pub struct OrderSummaryView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub quantity: u32,
    /// Preformatted order total, e.g. "$60.00".
    pub total_price: String,
}

impl From<&OrderDraft> for OrderSummaryView {
    fn from(order: &OrderDraft) -> Self {
        Self {
            name: order.name.clone(),
            email: order.email.to_string(),
            phone: order.phone.clone(),
            address: order.address.clone(),
            city: order.city.clone(),
            state: order.state.clone(),
            zip: order.zip.clone(),
            quantity: order.quantity,
            total_price: Price::new(order.total_price, CurrencyCode::USD).display(),
        }
    }
}

/// Purchased product display data.
#[derive(Clone)]
pub struct PurchasedProductView {
    pub title: String,
    pub description: String,
    /// Preformatted unit price, e.g. "$20.00".
    pub unit_price: String,
    pub thumbnail: String,
}

/// Thank-you page template.
#[derive(Template, WebTemplate)]
#[template(path = "thank_you.html")]
pub struct ThankYouTemplate {
    pub order: OrderSummaryView,
    pub product: PurchasedProductView,
}

/// Display the order confirmation page.
///
/// The product is re-fetched by its stored id so the summary shows current
/// catalog data alongside the exact name and total that were submitted.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some(order) = draft::load(&session).await else {
        // No completed purchase recorded - nothing to confirm
        return Ok(Redirect::to("/").into_response());
    };

    let product = state.catalog().get_product(order.product_id).await?;

    let template = ThankYouTemplate {
        order: OrderSummaryView::from(&order),
        product: PurchasedProductView {
            title: product.title.clone(),
            description: product.description.clone(),
            unit_price: product.unit_price().display(),
            thumbnail: product.thumbnail.clone(),
        },
    };

    Ok(template.into_response())
}
