//! Order submission service.
//!
//! Computes the order total and dispatches the confirmation email. There is
//! no persistence and no idempotency key: a failed submission is simply
//! reported, and a retried submission sends a second email.

use tracing::instrument;

use crate::catalog::types::Product;
use crate::checkout::{OrderDraft, ValidatedOrder};
use crate::services::email::{EmailError, EmailService, OrderConfirmation};

/// Places validated orders by notifying the customer over email.
#[derive(Clone)]
pub struct OrderService {
    email: EmailService,
}

impl OrderService {
    /// Create a new order service.
    #[must_use]
    pub const fn new(email: EmailService) -> Self {
        Self { email }
    }

    /// Submit a validated order for `product`.
    ///
    /// Computes `total = unit price x quantity` (two-decimal exact), sends
    /// the confirmation email, and returns the draft the caller should
    /// persist in the session before redirecting to the thank-you page.
    ///
    /// # Errors
    ///
    /// Returns the email error unchanged; nothing is retried.
    #[instrument(skip(self, product, order), fields(product_id = %product.id, quantity = order.quantity))]
    pub async fn place(
        &self,
        product: &Product,
        order: ValidatedOrder,
    ) -> Result<OrderDraft, EmailError> {
        let unit_price = product.unit_price();
        let total = unit_price.total(order.quantity);
        let unit_display = unit_price.display();
        let total_display = total.display();

        let confirmation = OrderConfirmation {
            name: &order.name,
            product_title: &product.title,
            product_thumbnail: &product.thumbnail,
            quantity: order.quantity,
            unit_price: &unit_display,
            total_price: &total_display,
            shipping_information: &product.shipping_information,
            return_policy: &product.return_policy,
        };

        self.email
            .send_order_confirmation(order.email.as_str(), &confirmation)
            .await?;

        Ok(OrderDraft {
            name: order.name,
            email: order.email,
            phone: order.phone,
            address: order.address,
            city: order.city,
            state: order.state,
            zip: order.zip,
            product_id: product.id,
            quantity: order.quantity,
            total_price: total.amount,
        })
    }

    /// Access the underlying email service (used by the JSON order API).
    #[must_use]
    pub const fn email(&self) -> &EmailService {
        &self.email
    }
}
