use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use crate::error::ApiError;

/// `Json` whose rejections answer with the usual `{error}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
