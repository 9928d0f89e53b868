//! Product record, the mutable field set, and payload coercion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: f64,
    /// Only set by the SQL backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Decode one record from the storage file, coercing loosely typed fields
    /// (`"id": "3"`, missing `stock`) instead of rejecting the whole file.
    /// Only non-object records are skipped.
    pub fn from_stored(record: &Value) -> Option<Self> {
        let fields = record.as_object()?;
        let number = |key: &str| fields.get(key).map(number_of).unwrap_or(0.0);
        Some(Product {
            id: number("id") as i64,
            name: fields.get("name").map(text_of).unwrap_or_default(),
            price: number("price"),
            stock: number("stock"),
            created_at: fields
                .get("created_at")
                .and_then(|v| serde_json::from_value(v.clone()).ok()),
        })
    }
}

/// The three fields a client may write. Always complete: built either from a
/// validated create payload or by merging a payload over an existing record.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub price: f64,
    pub stock: f64,
}

impl ProductFields {
    /// Fields of a validated create (or full replace) payload.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        ProductFields {
            name: payload.get("name").map(text_of).unwrap_or_default().trim().to_string(),
            price: payload.get("price").map(number_of).unwrap_or(0.0),
            stock: payload.get("stock").map(number_of).unwrap_or(0.0),
        }
    }

    /// Payload fields take precedence; anything absent is kept from `existing`.
    pub fn merge(existing: &Product, payload: &Map<String, Value>) -> Self {
        ProductFields {
            name: match payload.get("name") {
                Some(v) => text_of(v).trim().to_string(),
                None => existing.name.trim().to_string(),
            },
            price: payload.get("price").map(number_of).unwrap_or(existing.price),
            stock: payload.get("stock").map(number_of).unwrap_or(existing.stock),
        }
    }

    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            stock: self.stock,
            created_at: None,
        }
    }
}

/// Text form of a JSON value: strings as-is, booleans as "1"/"", null as "".
pub fn text_of(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".into(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// True for JSON numbers and strings holding a decimal number.
pub fn is_numeric(v: &Value) -> bool {
    match v {
        Value::Number(_) => true,
        Value::String(s) => {
            let t = s.trim();
            !t.is_empty() && t.parse::<f64>().map(|n| n.is_finite()).unwrap_or(false)
        }
        _ => false,
    }
}

/// Numeric value of a JSON value, used for range checks and storage.
pub fn number_of(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(s),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(a) => f64::from(u8::from(!a.is_empty())),
        Value::Object(o) => f64::from(u8::from(!o.is_empty())),
    }
}

/// Longest decimal prefix of `s` (after leading whitespace), or 0.
fn leading_number(s: &str) -> f64 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start {
        return 0.0;
    }
    // Optional exponent, only taken when followed by digits.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    t[..end].parse::<f64>().unwrap_or(0.0)
}
