//! Request extractors.

mod route;
pub use route::{ProductRoute, RESOURCE};
