//! Image persistence and chunked upload assembly.

mod disk;
mod error;
mod in_memory;
mod store;
mod upload;

pub use disk::DiskImageStore;
pub use error::ImageStoreError;
pub use in_memory::{InMemoryImageStore, StoredImage};
pub use store::ImageStore;
pub use upload::{AssembledImage, ImageUpload, UploadError, MAX_IMAGE_SIZE};
