use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use skinprice_market_data::PriceQuote;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::PriceParams,
};

async fn get_price(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PriceParams>,
) -> ApiResult<Json<PriceQuote>> {
    let product_id = params.product_id.as_deref();
    match state.price_service.get_price(product_id).await {
        Ok(quote) => {
            tracing::info!(
                "Priced {} at {} via {}",
                quote.item_id,
                quote.price,
                quote.provenance.provider
            );
            Ok(Json(quote))
        }
        Err(error) => {
            let error = ApiError::for_price(product_id, error);
            if let ApiError::PriceFetch {
                product_id,
                message,
            } = &error
            {
                tracing::error!("Pricing {} failed: {}", product_id, message);
            }
            Err(error)
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/price", get(get_price))
}
