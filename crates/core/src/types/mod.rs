//! Core types for E-Sales Mart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;

pub use email::{Email, EmailParseError};
pub use id::*;
pub use price::{CurrencyCode, Price};
