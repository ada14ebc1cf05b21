//! Business logic services for storefront.
//!
//! # Services
//!
//! - `email` - Confirmation email delivery over SMTP
//! - `orders` - Order total computation and submission

pub mod email;
pub mod orders;

pub use email::{EmailError, EmailService, OrderConfirmation};
pub use orders::OrderService;
