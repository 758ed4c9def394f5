use crate::error::StoreError;
use crate::model::Rating;

/// Concurrent rating accumulator storage.
pub trait RatingStore: Send + Sync {
    /// Fold `score` into the accumulator for `laptop_id`, creating it on the
    /// first rating, and return the accumulator as left by this call.
    fn add(&self, laptop_id: &str, score: f64) -> Result<Rating, StoreError>;
}
