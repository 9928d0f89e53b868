//! Resolve the request path to the products resource and an optional id.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Path segment naming the only resource this API serves.
pub const RESOURCE: &str = "products";

/// `/…/products` or `/…/products/{id}`. Resolved before the method is looked
/// at, so a bad id is a 400 for every method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductRoute {
    pub id: Option<i64>,
}

impl ProductRoute {
    pub fn resolve(path: &str) -> Result<Self, AppError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let pos = segments
            .iter()
            .position(|s| *s == RESOURCE)
            .ok_or_else(|| AppError::NotFound(format!("resource not found, use /{}", RESOURCE)))?;
        let id = match segments.get(pos + 1) {
            None => None,
            Some(raw) => Some(parse_id(raw)?),
        };
        Ok(ProductRoute { id })
    }
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest("id must be numeric".into()));
    }
    raw.parse()
        .map_err(|_| AppError::BadRequest("id is out of range".into()))
}

#[async_trait]
impl<S> FromRequestParts<S> for ProductRoute
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        ProductRoute::resolve(parts.uri.path())
    }
}
