//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// `{message?, data?}` envelope used for mutating operations.
#[derive(Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Bare JSON body with 200, used for reads.
pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn with_message<T: Serialize>(status: StatusCode, message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        status,
        Json(Envelope {
            message: Some(message.to_string()),
            data: Some(data),
        }),
    )
}

pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    with_message(StatusCode::CREATED, message, data)
}

pub fn ok_with_message<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    with_message(StatusCode::OK, message, data)
}
