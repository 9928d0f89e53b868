//! Product handlers. A single entry point dispatches on method and resolved route.

use crate::error::AppError;
use crate::extractors::ProductRoute;
use crate::response;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

/// Decode a POST/PUT/PATCH body. Must be a non-empty JSON object.
pub fn read_json_body(raw: &[u8]) -> Result<Map<String, Value>, AppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::BadRequest("request body is empty".into()));
    }
    let value: Value =
        serde_json::from_slice(raw).map_err(|e| AppError::BadRequest(format!("invalid JSON: {}", e)))?;
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("JSON body must be an object".into())),
    }
}

/// JSON 405 for routes whose path matched but whose method did not.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    route: ProductRoute,
    body: Bytes,
) -> Result<Response, AppError> {
    let store = state.store.as_ref();
    match (method, route.id) {
        (Method::GET, None) => Ok(response::ok(CrudService::list(store).await?).into_response()),
        (Method::GET, Some(id)) => Ok(response::ok(CrudService::read(store, id).await?).into_response()),
        (Method::POST, None) => {
            let payload = read_json_body(&body)?;
            let product = CrudService::create(store, &payload).await?;
            Ok(response::created("product created", product).into_response())
        }
        (m @ (Method::PUT | Method::PATCH), Some(id)) => {
            let payload = read_json_body(&body)?;
            let product = CrudService::update(store, id, &payload, m == Method::PUT).await?;
            Ok(response::ok_with_message("product updated", product).into_response())
        }
        (Method::DELETE, Some(id)) => {
            let product = CrudService::delete(store, id).await?;
            Ok(response::ok_with_message("product deleted", product).into_response())
        }
        _ => Err(AppError::MethodNotAllowed),
    }
}
