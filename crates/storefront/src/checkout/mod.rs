//! Checkout flow: form validation and the session-held order draft.

pub mod draft;
pub mod validation;

pub use draft::OrderDraft;
pub use validation::{CheckoutForm, ValidatedOrder, ValidationError, validate, validate_at};
