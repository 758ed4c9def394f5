use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::RatingStore;
use crate::error::StoreError;
use crate::model::Rating;

/// HashMap-backed rating store. Clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryRatingStore {
    storage: Arc<RwLock<HashMap<String, Rating>>>,
}

impl InMemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current accumulator for `laptop_id` without changing it.
    pub fn get(&self, laptop_id: &str) -> Result<Option<Rating>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("get rating"))?;
        Ok(storage.get(laptop_id).copied())
    }
}

impl RatingStore for InMemoryRatingStore {
    fn add(&self, laptop_id: &str, score: f64) -> Result<Rating, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("add rating"))?;

        let rating = storage.entry(laptop_id.to_string()).or_default();
        rating.record(score);
        Ok(*rating)
    }
}
