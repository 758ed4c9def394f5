//! Rating store: running score accumulators keyed by laptop id.

mod in_memory;
mod store;

pub use in_memory::InMemoryRatingStore;
pub use store::RatingStore;
