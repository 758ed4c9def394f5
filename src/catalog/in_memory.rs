//! InMemoryLaptopStore - HashMap-backed laptop store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::{LaptopStore, SearchResults};
use crate::cancel::Cancellation;
use crate::error::StoreError;
use crate::model::{Filter, Laptop};

/// In-memory laptop store backed by a HashMap under a `RwLock`.
///
/// Clone-friendly via Arc: clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryLaptopStore {
    storage: Arc<RwLock<HashMap<String, Laptop>>>,
    scan_delay: Duration,
}

impl InMemoryLaptopStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long per candidate during a search, to simulate costly
    /// matching.
    pub fn with_scan_delay(mut self, delay: Duration) -> Self {
        self.scan_delay = delay;
        self
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl LaptopStore for InMemoryLaptopStore {
    fn save(&self, laptop: &Laptop) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;

        if storage.contains_key(&laptop.id) {
            return Err(StoreError::AlreadyExists(laptop.id.clone()));
        }

        storage.insert(laptop.id.clone(), laptop.clone());
        Ok(())
    }

    fn find(&self, id: &str) -> Result<Option<Laptop>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("find"))?;

        Ok(storage.get(id).cloned())
    }

    fn search<'a>(
        &'a self,
        filter: &Filter,
        cancellation: &'a dyn Cancellation,
    ) -> Result<SearchResults<'a>, StoreError> {
        let ids: Vec<String> = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("search"))?
            .keys()
            .cloned()
            .collect();

        Ok(Box::new(Scan {
            storage: &self.storage,
            ids: ids.into_iter(),
            filter: filter.clone(),
            cancellation,
            delay: self.scan_delay,
            done: false,
        }))
    }
}

/// Lazy filter over a snapshot of the store's keys.
///
/// Each candidate is looked up under its own short read lock, so saves are
/// never held up for the length of a scan. Laptops saved after the scan
/// began are not visited.
pub struct Scan<'a> {
    storage: &'a RwLock<HashMap<String, Laptop>>,
    ids: std::vec::IntoIter<String>,
    filter: Filter,
    cancellation: &'a dyn Cancellation,
    delay: Duration,
    done: bool,
}

impl Iterator for Scan<'_> {
    type Item = Result<Laptop, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if self.cancellation.is_cancelled() {
                debug!(remaining = self.ids.len(), "search cancelled");
                self.done = true;
                break;
            }

            let Some(id) = self.ids.next() else {
                self.done = true;
                break;
            };

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }

            let storage = match self.storage.read() {
                Ok(storage) => storage,
                Err(_) => {
                    self.done = true;
                    return Some(Err(StoreError::LockPoisoned("search")));
                }
            };

            if let Some(laptop) = storage.get(&id) {
                if self.filter.matches(laptop) {
                    return Some(Ok(laptop.clone()));
                }
            }
        }

        None
    }
}
