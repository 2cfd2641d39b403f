//! Extractors whose rejections use the API error body.
//!
//! Axum's own `Json`, `Path` and `Query` reject with plain text. These
//! wrappers turn the same rejections into [`Error::Validation`], so a
//! malformed body, id or query string answers with the usual JSON error.

use axum::extract::{FromRequest, FromRequestParts};

use crate::prelude::*;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);
