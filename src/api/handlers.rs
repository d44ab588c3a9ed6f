use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::response::Packed;
use crate::errors::{catalog, normalize_result, ErrorDescriptor};
use crate::packer::Packer;
use crate::Pack;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub packer: Packer,
}

#[derive(Debug, Default, Serialize, Pack)]
pub struct HealthResponse {
    #[pack("err.code")]
    pub code: i16,
    #[pack("err.msg")]
    pub msg: String,
    #[pack("healthy")]
    pub status: String,
    #[pack("error-packer")]
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Pack)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

#[derive(Debug, Default, Serialize, Pack)]
pub struct LoginResponse {
    #[pack("-1")]
    pub seq: i64,
    #[pack("err.code")]
    pub code: i64,
    #[pack("err.msg")]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Default, Serialize, Pack)]
pub struct ErrorEnvelope {
    #[pack("err.code")]
    pub code: i16,
    #[pack("err.msg")]
    pub msg: String,
    pub category: String,
}

#[derive(Debug, Default, Serialize, Pack)]
pub struct CatalogResponse {
    #[pack("err.code")]
    pub code: i16,
    #[pack("err.msg")]
    pub msg: String,
    pub entries: Vec<ErrorDescriptor>,
}

#[derive(Debug, Error)]
enum LoginError {
    #[error("malformed login body: {reason}")]
    Malformed {
        reason: String,
        #[source]
        source: ErrorDescriptor,
    },
    #[error("login name is empty")]
    EmptyName(#[source] ErrorDescriptor),
}

/// Health check
pub async fn health(State(state): State<AppState>) -> Packed<HealthResponse> {
    let mut body = state.packer.pack(&HealthResponse::default(), None);
    body.version = env!("CARGO_PKG_VERSION").to_string();
    Packed::new(body, &catalog::OK)
}

/// Log in by name; an empty or malformed body is an input error
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Packed<LoginResponse> {
    let result = authenticate(payload);
    let descriptor = normalize_result(&result);

    let mut body = state.packer.pack_with(&LoginResponse::default(), &descriptor);
    body.user = result.ok();
    Packed::new(body, &descriptor)
}

fn authenticate(payload: Result<Json<LoginRequest>, JsonRejection>) -> Result<User, LoginError> {
    let Json(request) = payload.map_err(|rejection| LoginError::Malformed {
        reason: rejection.body_text(),
        source: catalog::INPUT_BODY,
    })?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(LoginError::EmptyName(catalog::INPUT_BODY));
    }

    Ok(User {
        name: name.to_string(),
    })
}

/// Look up one catalog entry by code
pub async fn describe_error(
    State(state): State<AppState>,
    code: Result<Path<i16>, PathRejection>,
) -> Packed<ErrorEnvelope> {
    let descriptor = match code {
        Ok(Path(code)) => catalog::lookup(code).cloned().unwrap_or(catalog::NO_RECORD),
        Err(_) => catalog::TYPE_CONVERSION,
    };

    let mut body = state.packer.pack_with(&ErrorEnvelope::default(), &descriptor);
    body.category = descriptor.category().to_string();
    Packed::new(body, &descriptor)
}

/// List the whole catalog
pub async fn list_catalog(State(state): State<AppState>) -> Packed<CatalogResponse> {
    let mut body = state.packer.pack(&CatalogResponse::default(), None);
    body.entries = catalog::ALL.to_vec();
    Packed::new(body, &catalog::OK)
}
