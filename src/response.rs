//! JSON body helpers matching the API's wire shapes.

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// `{"message": ...}` with status 200.
pub fn message(text: String) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "message": text })))
}

/// `{"message": ..., "id": ...}` with status 201, for successful inserts.
pub fn created(text: String, id: u64) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({ "message": text, "id": id })))
}
