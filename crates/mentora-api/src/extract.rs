//! Request body extraction.

use axum::{
  Json,
  extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A JSON request body.
///
/// A request without a JSON content type reads as the empty object
/// (`T::default()`), so field checks in the handler still apply. Any other
/// unreadable body becomes [`ApiError::BadRequest`].
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned + Default + Send,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    match Json::<T>::from_request(req, state).await {
      Ok(Json(value)) => Ok(Self(value)),
      Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(T::default())),
      Err(rejection) => Err(rejection.into()),
    }
  }
}
