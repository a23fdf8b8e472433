//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON request body whose decode failures use the API error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Query string whose decode failures use the API error envelope
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// Extract and validate an integer brand id from path
pub struct ValidBrandId(pub i64);

impl<S> FromRequestParts<S> for ValidBrandId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = id.parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
        })?;

        Ok(Self(id))
    }
}
