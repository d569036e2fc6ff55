use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use skinprice_core::catalog::{ProductPage, ProductQuery};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::ProductsParams,
};

async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductsParams>,
) -> ApiResult<Json<ProductPage>> {
    let query = ProductQuery::from_params(
        params.query.as_deref(),
        params.category.as_deref(),
        params.limit.as_deref(),
        params.offset.as_deref(),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(state.catalog.search(&query)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/products", get(list_products))
}
