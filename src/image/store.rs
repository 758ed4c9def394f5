use super::ImageStoreError;

/// Where finished uploads go.
pub trait ImageStore: Send + Sync {
    /// Persist `data` for `laptop_id` and return the new image's id.
    fn save(&self, laptop_id: &str, image_type: &str, data: &[u8])
        -> Result<String, ImageStoreError>;
}
