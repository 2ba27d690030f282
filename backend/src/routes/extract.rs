//! JSON body extractor with the API error envelope
//!
//! `axum::Json` rejects bad bodies with plain-text responses. [`ApiJson`]
//! runs the same extraction but rejects with [`ApiError`], so malformed and
//! mistyped bodies get the usual `{"error": {...}}` body.

use crate::error::ApiError;
use axum::extract::FromRequest;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
