//! LaptopStore - storage contract for catalog laptops.

use crate::cancel::Cancellation;
use crate::error::StoreError;
use crate::model::{Filter, Laptop};

/// Lazy sequence of laptops produced by a search.
pub type SearchResults<'a> = Box<dyn Iterator<Item = Result<Laptop, StoreError>> + 'a>;

/// Concurrent laptop storage.
///
/// Implementations synchronize internally; callers never lock. Values cross
/// the boundary by copy in both directions, so a caller mutating what it
/// passed in or got back never touches stored state.
pub trait LaptopStore: Send + Sync {
    /// Insert a copy of `laptop`. Fails with `AlreadyExists` when the id is
    /// taken; of two racing saves for one id exactly one succeeds.
    fn save(&self, laptop: &Laptop) -> Result<(), StoreError>;

    /// Copy of the laptop stored under `id`, if any.
    fn find(&self, id: &str) -> Result<Option<Laptop>, StoreError>;

    /// Copies of every stored laptop matching `filter`, in no particular
    /// order. `cancellation` is polled before each candidate; once it fires
    /// the sequence ends without an error.
    fn search<'a>(
        &'a self,
        filter: &Filter,
        cancellation: &'a dyn Cancellation,
    ) -> Result<SearchResults<'a>, StoreError>;
}
