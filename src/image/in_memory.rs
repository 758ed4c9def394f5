use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use super::{ImageStore, ImageStoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub laptop_id: String,
    pub image_type: String,
    pub data: Vec<u8>,
}

/// Keeps images in memory. Clones share storage.
#[derive(Clone, Default)]
pub struct InMemoryImageStore {
    storage: Arc<RwLock<HashMap<String, StoredImage>>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, image_id: &str) -> Result<Option<StoredImage>, ImageStoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| ImageStoreError::LockPoisoned("get"))?;
        Ok(storage.get(image_id).cloned())
    }

    pub fn len(&self) -> Result<usize, ImageStoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| ImageStoreError::LockPoisoned("len"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, ImageStoreError> {
        Ok(self.len()? == 0)
    }
}

impl ImageStore for InMemoryImageStore {
    fn save(
        &self,
        laptop_id: &str,
        image_type: &str,
        data: &[u8],
    ) -> Result<String, ImageStoreError> {
        let image_id = Uuid::new_v4().to_string();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| ImageStoreError::LockPoisoned("save"))?;

        storage.insert(
            image_id.clone(),
            StoredImage {
                laptop_id: laptop_id.to_string(),
                image_type: image_type.to_string(),
                data: data.to_vec(),
            },
        );
        Ok(image_id)
    }
}
