use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceParams {
    pub product_id: Option<String>,
}

/// Raw `/products` parameters; numbers are validated by `ProductQuery`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsParams {
    pub query: Option<String>,
    pub category: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}
