//! Categories

use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category key, referenced by [`Product::category`](crate::products::Product::category)
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Whether the category is featured on the home page
    #[serde(default)]
    pub featured: bool,
}
