//! HTTP handlers for the products resource.

pub mod product;
pub use product::*;
