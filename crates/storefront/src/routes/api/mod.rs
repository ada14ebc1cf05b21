//! JSON API route handlers.

pub mod orders;
