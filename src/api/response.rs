use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::ErrorDescriptor;

/// Header carrying the packed outcome code, so intermediaries can branch on
/// it without parsing the body.
pub const ERROR_CODE_HEADER: &str = "x-error-code";

/// A packed body ready to go on the wire.
///
/// Always HTTP 200: the outcome lives in the envelope, not the status line.
#[derive(Debug, Clone)]
pub struct Packed<T> {
    pub body: T,
    pub code: i16,
}

impl<T> Packed<T> {
    pub fn new(body: T, descriptor: &ErrorDescriptor) -> Self {
        Self {
            body,
            code: descriptor.code(),
        }
    }
}

impl<T: Serialize> IntoResponse for Packed<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, Json(self.body)).into_response();
        response
            .headers_mut()
            .insert(ERROR_CODE_HEADER, HeaderValue::from(self.code));
        response
    }
}
