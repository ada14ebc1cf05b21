//! Checkout route handlers.
//!
//! `GET /checkout/{id}` renders the order summary and the shipping/payment
//! form; `POST /checkout/{id}` validates the submission, sends the
//! confirmation email, and redirects to the thank-you page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use esales_mart_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::types::{Product, Review};
use crate::checkout::{self, CheckoutForm, draft};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product display data for the checkout page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub brand: Option<String>,
    pub category: String,
    /// Preformatted price, e.g. "$9.99".
    pub price: String,
    /// Pre-discount price, shown struck through when a discount applies.
    pub original_price: Option<String>,
    pub rating: String,
    pub stock: u32,
    pub in_stock: bool,
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub shipping_information: String,
    pub warranty_information: String,
    pub return_policy: String,
    pub reviews: Vec<ReviewView>,
}

/// Review display data for the checkout page.
#[derive(Clone)]
pub struct ReviewView {
    pub rating: u8,
    pub comment: String,
    /// Date portion of the review timestamp (YYYY-MM-DD).
    pub date: String,
    pub reviewer_name: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            rating: review.rating,
            comment: review.comment.clone(),
            date: review
                .date
                .split_once('T')
                .map_or_else(|| review.date.clone(), |(day, _)| day.to_string()),
            reviewer_name: review.reviewer_name.clone(),
        }
    }
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            description: product.description.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: product.unit_price().display(),
            original_price: pre_discount_price(product),
            rating: format!("{:.1}", product.rating),
            stock: product.stock,
            in_stock: product.stock > 0,
            tags: product.tags.clone(),
            thumbnail: product.thumbnail.clone(),
            shipping_information: product.shipping_information.clone(),
            warranty_information: product.warranty_information.clone(),
            return_policy: product.return_policy.clone(),
            reviews: product.reviews.iter().map(ReviewView::from).collect(),
        }
    }
}

/// Reconstruct the pre-discount price from the discounted price.
fn pre_discount_price(product: &Product) -> Option<String> {
    if product.discount_percentage <= 0.0 || product.discount_percentage >= 100.0 {
        return None;
    }
    let discounted = product.price.to_f64()?;
    let original = discounted / (1.0 - product.discount_percentage / 100.0);
    let amount = Decimal::from_f64(original)?.round_dp(2);
    Some(Price::new(amount, CurrencyCode::USD).display())
}

/// Previously entered form values, echoed back on validation failure.
///
/// Payment fields are deliberately never echoed.
#[derive(Clone, Default)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub quantity: u32,
}

impl FormValues {
    fn empty() -> Self {
        Self {
            quantity: 1,
            ..Self::default()
        }
    }
}

impl From<&CheckoutForm> for FormValues {
    fn from(form: &CheckoutForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            zip: form.zip.clone(),
            quantity: form.quantity.max(1),
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub product: ProductDetailView,
    pub values: FormValues,
    pub error: Option<String>,
}

/// Display the checkout page for a product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let product = state.catalog().get_product(ProductId::new(id)).await?;

    Ok(CheckoutTemplate {
        product: ProductDetailView::from(&product),
        values: FormValues::empty(),
        error: None,
    })
}

/// Place an order.
///
/// Validation runs server-side against the product's current stock; the
/// confirmation email is only sent once every rule passes. On success the
/// draft is written to the session and the customer is redirected to the
/// thank-you page.
#[instrument(skip(state, session, form))]
pub async fn place_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let product = state.catalog().get_product(ProductId::new(id)).await?;

    let validated = match checkout::validate(&form, product.stock) {
        Ok(validated) => validated,
        Err(e) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                CheckoutTemplate {
                    product: ProductDetailView::from(&product),
                    values: FormValues::from(&form),
                    error: Some(e.to_string()),
                },
            )
                .into_response());
        }
    };

    match state.orders().place(&product, validated).await {
        Ok(order_draft) => {
            draft::save(&session, &order_draft).await?;
            tracing::info!(product_id = %product.id, "Order placed successfully");
            Ok(Redirect::to("/thank-you").into_response())
        }
        Err(e) => {
            tracing::error!(product_id = %product.id, error = %e, "Failed to send order email");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                CheckoutTemplate {
                    product: ProductDetailView::from(&product),
                    values: FormValues::from(&form),
                    error: Some("Something went wrong. Please try again.".to_string()),
                },
            )
                .into_response())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Essence Mascara Lash Princess",
                "description": "A popular mascara.",
                "category": "beauty",
                "price": 9.99,
                "discountPercentage": 10.48,
                "rating": 2.56,
                "stock": 99,
                "tags": ["beauty", "mascara"],
                "brand": "Essence",
                "shippingInformation": "Ships in 3-5 business days",
                "warrantyInformation": "1 week warranty",
                "returnPolicy": "No return policy",
                "reviews": [
                    {
                        "rating": 3,
                        "comment": "Would not recommend!",
                        "date": "2025-04-30T09:41:02.053Z",
                        "reviewerName": "Eleanor Collins"
                    }
                ],
                "thumbnail": "https://cdn.example.com/1/thumbnail.webp"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_pre_discount_price() {
        // 9.99 / (1 - 0.1048) = 11.16
        let price = pre_discount_price(&sample_product()).unwrap();
        assert_eq!(price, "$11.16");
    }

    #[test]
    fn test_no_pre_discount_price_without_discount() {
        let mut product = sample_product();
        product.discount_percentage = 0.0;
        assert!(pre_discount_price(&product).is_none());
    }

    #[test]
    fn test_review_view_trims_timestamp() {
        let product = sample_product();
        let view = ProductDetailView::from(&product);
        assert_eq!(view.reviews[0].date, "2025-04-30");
    }

    #[test]
    fn test_checkout_template_renders_form_and_summary() {
        let product = sample_product();
        let template = CheckoutTemplate {
            product: ProductDetailView::from(&product),
            values: FormValues::empty(),
            error: None,
        };
        let html = template.render().unwrap();
        assert!(html.contains("Essence Mascara Lash Princess"));
        assert!(html.contains("Place Order"));
        assert!(html.contains("card_number"));
    }

    #[test]
    fn test_checkout_template_renders_error_banner() {
        let product = sample_product();
        let template = CheckoutTemplate {
            product: ProductDetailView::from(&product),
            values: FormValues::empty(),
            error: Some("Please fill in all fields".to_string()),
        };
        let html = template.render().unwrap();
        assert!(html.contains("Please fill in all fields"));
    }
}
