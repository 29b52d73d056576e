//! Reviews

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Lowest rating a review may carry.
pub const MIN_RATING: u8 = 1;

/// Highest rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique review id
    pub id: String,

    /// Reviewed product
    pub product_id: String,

    /// Reviewer display name
    pub user_name: String,

    /// Star rating, 1 to 5
    pub rating: u8,

    /// Review headline
    pub title: String,

    /// Review body
    pub content: String,

    /// When the review was written
    pub created_at: Timestamp,

    /// Whether the reviewer bought the product
    #[serde(default)]
    pub verified: bool,
}

impl Review {
    /// Whether the rating is within the accepted range.
    pub fn has_valid_rating(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}
