//! Order draft stored in the session.
//!
//! The draft is the typed hand-off between the checkout POST and the
//! thank-you page. It is written once on successful order placement,
//! read by the confirmation view, and wiped wholesale when the customer
//! next lands on the home page. A separate completion flag gates the
//! confirmation view.

use esales_mart_core::{Email, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session keys for checkout state.
pub mod keys {
    /// Key for the completed order draft.
    pub const ORDER_DRAFT: &str = "order_draft";

    /// Key for the purchase-completed flag.
    pub const PURCHASE_SUCCESS: &str = "purchase_success";
}

/// A completed order, as handed to the confirmation view.
///
/// No server-side record exists beyond this session entry; payment fields
/// are never part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub product_id: ProductId,
    pub quantity: u32,
    pub total_price: Decimal,
}

/// Persist a completed draft and set the purchase flag.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save(session: &Session, draft: &OrderDraft) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::ORDER_DRAFT, draft).await?;
    session.insert(keys::PURCHASE_SUCCESS, true).await
}

/// Load the draft if a completed purchase is recorded.
///
/// Returns `None` when the purchase flag is absent or the draft is missing,
/// in which case the confirmation view must redirect home.
pub async fn load(session: &Session) -> Option<OrderDraft> {
    let success = session
        .get::<bool>(keys::PURCHASE_SUCCESS)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);
    if !success {
        return None;
    }
    session.get::<OrderDraft>(keys::ORDER_DRAFT).await.ok().flatten()
}

/// Wipe all checkout state (landing-page semantics).
pub async fn clear(session: &Session) {
    session.clear().await;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn sample_draft() -> OrderDraft {
        OrderDraft {
            name: "Ada Lovelace".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            phone: "5551234567".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip: "12345".to_string(),
            product_id: ProductId::new(1),
            quantity: 3,
            total_price: Decimal::new(6000, 2),
        }
    }

    #[tokio::test]
    async fn test_load_returns_none_on_fresh_session() {
        let session = test_session();
        assert!(load(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_load_returns_none_without_purchase_flag() {
        // A draft alone must not unlock the confirmation view
        let session = test_session();
        session
            .insert(keys::ORDER_DRAFT, &sample_draft())
            .await
            .unwrap();
        assert!(load(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_load_returns_none_when_flag_is_false() {
        let session = test_session();
        session
            .insert(keys::ORDER_DRAFT, &sample_draft())
            .await
            .unwrap();
        session.insert(keys::PURCHASE_SUCCESS, false).await.unwrap();
        assert!(load(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips_submitted_values() {
        let session = test_session();
        save(&session, &sample_draft()).await.unwrap();

        let loaded = load(&session).await.unwrap();
        assert_eq!(loaded.name, "Ada Lovelace");
        assert_eq!(loaded.email.as_str(), "ada@example.com");
        assert_eq!(loaded.quantity, 3);
        assert_eq!(loaded.total_price, Decimal::new(6000, 2));
    }

    #[tokio::test]
    async fn test_draft_survives_repeated_loads() {
        // The flag is not consumed on read, so a confirmation-page
        // refresh still renders
        let session = test_session();
        save(&session, &sample_draft()).await.unwrap();

        assert!(load(&session).await.is_some());
        assert!(load(&session).await.is_some());
    }

    #[tokio::test]
    async fn test_clear_wipes_draft_and_flag() {
        let session = test_session();
        save(&session, &sample_draft()).await.unwrap();

        clear(&session).await;
        assert!(load(&session).await.is_none());
    }
}
