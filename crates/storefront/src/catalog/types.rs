//! Typed responses from the product catalog API.
//!
//! The catalog is read-only and owned by the external service; these types
//! mirror its JSON shape (camelCase). Fields the upstream sometimes omits
//! default to empty rather than failing the whole listing.

use esales_mart_core::{CurrencyCode, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    /// Unit price in USD.
    pub price: Decimal,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub shipping_information: String,
    #[serde(default)]
    pub warranty_information: String,
    #[serde(default)]
    pub return_policy: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Unit price as a typed [`Price`] (catalog prices are USD).
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price, CurrencyCode::USD)
    }
}

/// A customer review attached to a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub rating: u8,
    pub comment: String,
    /// ISO 8601 timestamp string, e.g. "2024-05-23T08:56:21.618Z".
    #[serde(default)]
    pub date: String,
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: String,
}

/// Envelope returned by the catalog's product listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE_PRODUCT: &str = r#"{
        "id": 1,
        "title": "Essence Mascara Lash Princess",
        "description": "A popular mascara known for its volumizing effects.",
        "category": "beauty",
        "price": 9.99,
        "discountPercentage": 10.48,
        "rating": 2.56,
        "stock": 99,
        "tags": ["beauty", "mascara"],
        "brand": "Essence",
        "warrantyInformation": "1 week warranty",
        "shippingInformation": "Ships in 3-5 business days",
        "returnPolicy": "No return policy",
        "reviews": [
            {
                "rating": 3,
                "comment": "Would not recommend!",
                "date": "2025-04-30T09:41:02.053Z",
                "reviewerName": "Eleanor Collins",
                "reviewerEmail": "eleanor.collins@x.dummyjson.com"
            }
        ],
        "thumbnail": "https://cdn.dummyjson.com/product-images/1/thumbnail.webp",
        "images": ["https://cdn.dummyjson.com/product-images/1/1.webp"]
    }"#;

    #[test]
    fn test_deserialize_product() {
        let product: Product = serde_json::from_str(SAMPLE_PRODUCT).unwrap();
        assert_eq!(product.id.as_i64(), 1);
        assert_eq!(product.title, "Essence Mascara Lash Princess");
        assert_eq!(product.price, Decimal::new(999, 2));
        assert_eq!(product.stock, 99);
        assert_eq!(product.brand.as_deref(), Some("Essence"));
        assert_eq!(product.reviews.len(), 1);
        assert_eq!(product.reviews[0].reviewer_name, "Eleanor Collins");
    }

    #[test]
    fn test_deserialize_product_with_missing_optional_fields() {
        // Some catalog entries omit brand, tags, and reviews
        let json = r#"{
            "id": 5,
            "title": "Bare Minimum",
            "description": "No optional fields at all.",
            "price": 20.00
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.brand.is_none());
        assert!(product.tags.is_empty());
        assert!(product.reviews.is_empty());
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn test_deserialize_product_list() {
        let json = format!(
            r#"{{"products": [{SAMPLE_PRODUCT}], "total": 194, "skip": 0, "limit": 30}}"#
        );
        let list: ProductList = serde_json::from_str(&json).unwrap();
        assert_eq!(list.products.len(), 1);
        assert_eq!(list.total, 194);
    }

    #[test]
    fn test_unit_price_is_decimal_exact() {
        let product: Product = serde_json::from_str(SAMPLE_PRODUCT).unwrap();
        let price = product.unit_price();
        assert_eq!(price.display(), "$9.99");
    }
}
