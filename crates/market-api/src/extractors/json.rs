//! JSON body extractor that runs `validator` rules after deserializing.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use validator::Validate;

use market_core::error::AppError;

use crate::error::ApiError;

/// A deserialized and validated JSON body.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                AppError::validation(rejection.body_text())
            })?;

        value.validate().map_err(|errors| {
            let details = serde_json::to_value(&errors).unwrap_or_default();
            ApiError::with_details(AppError::validation("Request validation failed"), details)
        })?;

        Ok(ValidatedJson(value))
    }
}
