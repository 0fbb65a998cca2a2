//! Request extractors whose rejections use the standard error envelope.
//!
//! Plain `axum::Json` and `axum::extract::Path` answer malformed input with a
//! plain-text body; these wrappers route the rejection through [`AppError`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters, e.g. `IdPath(id): IdPath<DbId>`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct IdPath<T>(pub T);
