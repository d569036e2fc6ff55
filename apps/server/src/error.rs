use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use skinprice_core::errors::Error as CoreError;
use skinprice_market_data::SCHEMA_VERSION;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("productId required")]
    MissingProductId,
    #[error("Product not found")]
    ProductNotFound { product_id: String },
    #[error("Failed to fetch price")]
    PriceFetch { product_id: String, message: String },
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Core(#[from] CoreError),
}

impl ApiError {
    /// Map a pricing failure for `product_id` onto the price endpoint's
    /// response shapes.
    pub fn for_price(product_id: Option<&str>, error: CoreError) -> Self {
        let product_id = product_id.unwrap_or_default().trim().to_string();
        match error {
            CoreError::Validation(_) => ApiError::MissingProductId,
            CoreError::NotFound(_) => ApiError::ProductNotFound { product_id },
            other => ApiError::PriceFetch {
                product_id,
                message: other.to_string(),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    schema_version: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let (status, product_id, message) = match self {
            ApiError::MissingProductId => (StatusCode::BAD_REQUEST, None, None),
            ApiError::ProductNotFound { product_id } => {
                (StatusCode::NOT_FOUND, Some(product_id), None)
            }
            ApiError::PriceFetch {
                product_id,
                message,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(product_id),
                Some(message),
            ),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, None, None),
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, None, None),
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, None, None),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, None, None),
            },
        };
        let body = Json(ErrorBody {
            error,
            product_id,
            message,
            schema_version: SCHEMA_VERSION,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
