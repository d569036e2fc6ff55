//! Catalog domain models.

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Page size when a listing request gives none.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// A curated catalog item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "productId")]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Condition tier, e.g. "Factory New"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Filter and pagination for catalog listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring over name, id, tags and category
    pub query: Option<String>,
    /// Case-insensitive exact category
    pub category: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl ProductQuery {
    /// Build a query from raw request parameters.
    ///
    /// Blank text filters are ignored; numbers must parse as non-negative
    /// integers.
    pub fn from_params(
        query: Option<&str>,
        category: Option<&str>,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Self> {
        let text = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            query: text(query),
            category: text(category),
            limit: match limit {
                Some(raw) => raw.trim().parse()?,
                None => DEFAULT_PAGE_LIMIT,
            },
            offset: match offset {
                Some(raw) => raw.trim().parse()?,
                None => 0,
            },
        })
    }
}

/// One page of catalog results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Matches before pagination
    pub total: usize,
    pub has_more: bool,
}
