//! LaptopService: create, search, upload and rate over injected stores.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::ServiceError;
use crate::cancel::Cancellation;
use crate::catalog::LaptopStore;
use crate::image::{ImageStore, ImageUpload, UploadError};
use crate::rating::RatingStore;
use crate::rpc::{
    upload_image_request, CreateLaptopRequest, CreateLaptopResponse, RateLaptopRequest,
    RateLaptopResponse, SearchLaptopRequest, SearchLaptopResponse, UploadImageRequest,
    UploadImageResponse,
};

/// Capacity of the outbound channel of streaming calls.
pub const OUTBOUND_BUFFER: usize = 16;

/// The laptop operations, generic over the stores they run against.
///
/// Cheap to clone: clones share the stores.
pub struct LaptopService<L, I, R> {
    laptop_store: Arc<L>,
    image_store: Arc<I>,
    rating_store: Arc<R>,
}

impl<L, I, R> Clone for LaptopService<L, I, R> {
    fn clone(&self) -> Self {
        Self {
            laptop_store: Arc::clone(&self.laptop_store),
            image_store: Arc::clone(&self.image_store),
            rating_store: Arc::clone(&self.rating_store),
        }
    }
}

impl<L, I, R> LaptopService<L, I, R>
where
    L: LaptopStore + 'static,
    I: ImageStore + 'static,
    R: RatingStore + 'static,
{
    pub fn new(laptop_store: Arc<L>, image_store: Arc<I>, rating_store: Arc<R>) -> Self {
        Self {
            laptop_store,
            image_store,
            rating_store,
        }
    }

    pub fn laptop_store(&self) -> &L {
        &self.laptop_store
    }

    pub fn image_store(&self) -> &I {
        &self.image_store
    }

    pub fn rating_store(&self) -> &R {
        &self.rating_store
    }

    /// Store a new laptop and return its id.
    ///
    /// An empty id is replaced with a fresh UUID; any other id must parse as
    /// a UUID and is stored in its canonical form. Cancellation is checked
    /// once, before the store is touched.
    pub fn create_laptop(
        &self,
        request: CreateLaptopRequest,
        cancellation: &dyn Cancellation,
    ) -> Result<CreateLaptopResponse, ServiceError> {
        let mut laptop = request
            .laptop
            .ok_or_else(|| ServiceError::InvalidArgument("laptop is required".into()))?;
        info!(id = %laptop.id, "received create-laptop request");

        laptop.id = normalize_id(&laptop.id)?;

        if cancellation.is_cancelled() {
            info!(id = %laptop.id, "create-laptop request is cancelled");
            return Err(ServiceError::Cancelled("request is cancelled".into()));
        }

        self.laptop_store.save(&laptop)?;
        info!(id = %laptop.id, "saved laptop");

        Ok(CreateLaptopResponse { id: laptop.id })
    }

    /// Stream every laptop matching the request's filter.
    ///
    /// The scan runs on a blocking worker and stops quietly when either
    /// `cancellation` fires or the returned receiver is dropped.
    pub fn search_laptop<C>(
        &self,
        request: SearchLaptopRequest,
        cancellation: C,
    ) -> mpsc::Receiver<Result<SearchLaptopResponse, ServiceError>>
    where
        C: Cancellation + Send + 'static,
    {
        let filter = request.filter.unwrap_or_default();
        info!(?filter, "received search-laptop request");

        let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);
        let store = Arc::clone(&self.laptop_store);

        tokio::task::spawn_blocking(move || {
            let cancellation = (cancellation, tx.clone());
            let results = match store.search(&filter, &cancellation) {
                Ok(results) => results,
                Err(e) => {
                    let _ = tx.blocking_send(Err(e.into()));
                    return;
                }
            };

            let mut found = 0usize;
            for result in results {
                let item = match result {
                    Ok(laptop) => {
                        debug!(id = %laptop.id, "found laptop");
                        Ok(SearchLaptopResponse {
                            laptop: Some(laptop),
                        })
                    }
                    Err(e) => Err(ServiceError::from(e)),
                };
                let failed = item.is_err();

                if tx.blocking_send(item).is_err() {
                    debug!(found, "search receiver dropped");
                    return;
                }
                if failed {
                    return;
                }
                found += 1;
            }

            info!(found, "search-laptop completed");
        });

        rx
    }

    /// Assemble an image from `inbound` and persist it.
    ///
    /// The first message must carry the image info for a stored laptop;
    /// the rest carry chunks. Any failure ends the call at once without
    /// reading further messages, and nothing is persisted.
    pub async fn upload_image<St, E>(
        &self,
        mut inbound: St,
    ) -> Result<UploadImageResponse, ServiceError>
    where
        St: Stream<Item = Result<UploadImageRequest, E>> + Unpin,
        E: fmt::Display,
    {
        let mut upload = ImageUpload::new();

        while let Some(message) = inbound.next().await {
            let request = match message {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "upload-image stream failed");
                    return Err(ServiceError::Cancelled(format!(
                        "upload stream aborted: {}",
                        e
                    )));
                }
            };

            match request.data {
                Some(upload_image_request::Data::Info(info)) => {
                    info!(
                        laptop_id = %info.laptop_id,
                        image_type = %info.image_type,
                        "received image info"
                    );
                    if upload.has_info() {
                        return Err(UploadError::InfoAlreadyReceived.into());
                    }
                    self.require_laptop(&info.laptop_id)?;
                    upload.begin(info.laptop_id, info.image_type)?;
                }
                Some(upload_image_request::Data::ChunkData(chunk)) => {
                    debug!(size = chunk.len(), "received image chunk");
                    if let Err(e) = upload.append(&chunk) {
                        info!(error = %e, "rejected image chunk");
                        return Err(e.into());
                    }
                }
                None => {
                    return Err(ServiceError::InvalidArgument(
                        "upload message carries neither image info nor chunk data".into(),
                    ));
                }
            }
        }

        let image = upload.finish()?;
        let size = image.data.len();
        let store = Arc::clone(&self.image_store);

        let image_id = tokio::task::spawn_blocking(move || {
            store.save(&image.laptop_id, &image.image_type, &image.data)
        })
        .await
        .map_err(|e| ServiceError::Internal(format!("image save task failed: {}", e)))??;

        info!(image_id = %image_id, size, "saved image");
        Ok(UploadImageResponse {
            id: image_id,
            size: size as u32,
        })
    }

    /// Rate laptops as the ratings arrive.
    ///
    /// One response is sent per inbound rating, in order, while later
    /// ratings may still be in flight. An unknown laptop ends the call with
    /// `NotFound` as its last message.
    pub fn rate_laptop<St, E>(
        &self,
        inbound: St,
    ) -> mpsc::Receiver<Result<RateLaptopResponse, ServiceError>>
    where
        St: Stream<Item = Result<RateLaptopRequest, E>> + Send + Unpin + 'static,
        E: fmt::Display + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(OUTBOUND_BUFFER);
        let service = self.clone();

        tokio::spawn(async move { service.rate_stream(inbound, tx).await });

        rx
    }

    /// Apply a single rating.
    pub fn rate(&self, request: &RateLaptopRequest) -> Result<RateLaptopResponse, ServiceError> {
        info!(
            laptop_id = %request.laptop_id,
            score = request.score,
            "received rate-laptop request"
        );
        self.require_laptop(&request.laptop_id)?;

        let rating = self.rating_store.add(&request.laptop_id, request.score)?;
        Ok(RateLaptopResponse {
            laptop_id: request.laptop_id.clone(),
            rated_count: rating.count,
            average_score: rating.average(),
        })
    }

    async fn rate_stream<St, E>(
        &self,
        mut inbound: St,
        tx: mpsc::Sender<Result<RateLaptopResponse, ServiceError>>,
    ) where
        St: Stream<Item = Result<RateLaptopRequest, E>> + Unpin,
        E: fmt::Display,
    {
        while let Some(message) = inbound.next().await {
            let request = match message {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "rate-laptop stream failed");
                    return;
                }
            };

            let outcome = self.rate(&request);
            let failed = outcome.is_err();

            if tx.send(outcome).await.is_err() {
                debug!("rate-laptop receiver dropped");
                return;
            }
            if failed {
                return;
            }
        }

        debug!("rate-laptop completed");
    }

    fn require_laptop(&self, id: &str) -> Result<(), ServiceError> {
        match self.laptop_store.find(id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(format!("laptop {} does not exist", id))),
        }
    }
}

/// Fresh UUID for an empty id, canonical form of a valid one.
fn normalize_id(id: &str) -> Result<String, ServiceError> {
    if id.is_empty() {
        return Ok(Uuid::new_v4().to_string());
    }

    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|e| {
            ServiceError::InvalidArgument(format!("laptop id {:?} is not a valid UUID: {}", id, e))
        })
}
