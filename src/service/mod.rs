//! service: the four laptop operations over the stores.
//!
//! `LaptopService` is transport-agnostic: it takes typed requests, a
//! cancellation signal and inbound message streams, and answers with typed
//! responses or outbound channels. The `grpc` module binds it to tonic.
//!
//! ```ignore
//! use std::sync::Arc;
//! use pcbook::{InMemoryImageStore, InMemoryLaptopStore, InMemoryRatingStore, LaptopService};
//!
//! let service = LaptopService::new(
//!     Arc::new(InMemoryLaptopStore::new()),
//!     Arc::new(InMemoryImageStore::new()),
//!     Arc::new(InMemoryRatingStore::new()),
//! );
//! let id = service.create_laptop(request, &NotCancelled)?.id;
//! ```

mod error;
mod laptop_service;

pub use error::ServiceError;
pub use laptop_service::{LaptopService, OUTBOUND_BUFFER};
