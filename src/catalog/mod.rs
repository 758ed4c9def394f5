//! Catalog store: laptops keyed by identifier.

mod in_memory;
mod store;

pub use in_memory::{InMemoryLaptopStore, Scan};
pub use store::{LaptopStore, SearchResults};
