//! Home page route handler.
//!
//! Landing on the home page wipes any checkout state from the session
//! before rendering the product grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use rust_decimal::prelude::ToPrimitive;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::types::Product;
use crate::checkout::draft;
use crate::filters;
use crate::state::AppState;

/// Product card display data for the listing grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Preformatted price, e.g. "$9.99".
    pub price: String,
    /// Whole-percent discount badge, shown only when > 0.
    pub discount_percent: Option<u32>,
    /// Rating out of 5, one decimal place.
    pub rating: String,
    pub thumbnail: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let discount_percent = if product.discount_percentage > 0.0 {
            Some(product.discount_percentage.round().to_u32().unwrap_or(0))
        } else {
            None
        };

        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.unit_price().display(),
            discount_percent,
            rating: format!("{:.1}", product.rating),
            thumbnail: product.thumbnail.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
}

/// Display the home page with the full product listing.
///
/// Any previous checkout state (including a stale purchase flag) is cleared
/// here, and only here.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    draft::clear(&session).await;

    let products = state.catalog().get_products().await.map_or_else(
        |e| {
            tracing::error!("Failed to fetch product listing: {e}");
            Vec::new()
        },
        |products| products.iter().map(ProductCardView::from).collect(),
    );

    HomeTemplate { products }
}
