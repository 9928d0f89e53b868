//! Product routes. Path resolution is done by the `ProductRoute` extractor rather
//! than the router, so every path that is not a common route lands here.

use crate::handlers::dispatch;
use crate::state::AppState;
use axum::Router;

pub fn product_routes() -> Router<AppState> {
    Router::new().fallback(dispatch)
}
