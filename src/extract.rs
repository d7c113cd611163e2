use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejections are answered as `{"error": ...}`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
