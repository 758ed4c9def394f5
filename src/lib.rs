//! pcbook: a laptop catalog served over gRPC.
//!
//! Four RPCs over shared, internally synchronized in-memory stores:
//! unary create, server-streaming search, client-streaming image upload and
//! bidirectional-streaming rating. `LaptopService` holds the logic and is
//! transport-agnostic; `grpc` binds it to tonic.

pub mod cancel;
mod catalog;
mod config;
mod error;
pub mod grpc;
mod image;
pub mod model;
mod rating;
pub mod rpc;
pub mod sample;
pub mod serializer;
mod service;

pub use cancel::{Cancellation, Deadline, NotCancelled};
pub use catalog::{InMemoryLaptopStore, LaptopStore, Scan, SearchResults};
pub use config::ServerConfig;
pub use error::StoreError;
pub use image::{
    AssembledImage, DiskImageStore, ImageStore, ImageStoreError, ImageUpload, InMemoryImageStore,
    StoredImage, UploadError, MAX_IMAGE_SIZE,
};
pub use model::{Filter, Laptop, Memory, Rating};
pub use rating::{InMemoryRatingStore, RatingStore};
pub use service::{LaptopService, ServiceError, OUTBOUND_BUFFER};
