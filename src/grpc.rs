//! gRPC transport for the laptop service.
//!
//! Uses tonic for the server and prost for messages (standard protobuf wire
//! format, no `.proto` file). The service trait, server and client are
//! generated by `build.rs`.
//!
//! ## RPCs (`techschool.pcbook.LaptopService`)
//!
//! - `CreateLaptop`: unary.
//! - `SearchLaptop`: server streaming.
//! - `UploadImage`: client streaming.
//! - `RateLaptop`: bidirectional streaming.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let service = Arc::new(pcbook::LaptopService::new(laptops, images, ratings));
//!
//! // Get the server to compose with other tonic routes
//! let grpc_svc = pcbook::grpc::laptop_service_server(service.clone());
//!
//! // Or serve directly
//! pcbook::grpc::serve(service, "[::1]:8080".parse()?).await?;
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tonic::metadata::MetadataMap;
use tonic::{Request, Response, Status, Streaming};
use tracing::info;

use crate::cancel::Deadline;
use crate::catalog::LaptopStore;
use crate::image::ImageStore;
use crate::rating::RatingStore;
use crate::rpc::{
    CreateLaptopRequest, CreateLaptopResponse, RateLaptopRequest, RateLaptopResponse,
    SearchLaptopRequest, SearchLaptopResponse, UploadImageRequest, UploadImageResponse,
};
use crate::service::{self, ServiceError};

// ---------------------------------------------------------------------------
// Generated service trait + server/client
// ---------------------------------------------------------------------------

include!(concat!(
    env!("OUT_DIR"),
    "/techschool.pcbook.LaptopService.rs"
));

pub use laptop_service_client::LaptopServiceClient;
pub use laptop_service_server::{LaptopService, LaptopServiceServer};

/// Outbound stream type of the streaming RPCs.
pub type ResponseStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

impl From<ServiceError> for Status {
    fn from(err: ServiceError) -> Self {
        let message = err.message().to_string();
        match err {
            ServiceError::InvalidArgument(_) => Status::invalid_argument(message),
            ServiceError::NotFound(_) => Status::not_found(message),
            ServiceError::AlreadyExists(_) => Status::already_exists(message),
            ServiceError::Cancelled(_) => Status::cancelled(message),
            ServiceError::Internal(_) => Status::internal(message),
        }
    }
}

// ---------------------------------------------------------------------------
// Handler implementation
// ---------------------------------------------------------------------------

/// gRPC handler that wraps a shared `service::LaptopService` and implements
/// the generated `LaptopService` trait.
pub struct GrpcHandler<L, I, R> {
    service: Arc<service::LaptopService<L, I, R>>,
}

impl<L, I, R> GrpcHandler<L, I, R> {
    pub fn new(service: Arc<service::LaptopService<L, I, R>>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<L, I, R> LaptopService for GrpcHandler<L, I, R>
where
    L: LaptopStore + 'static,
    I: ImageStore + 'static,
    R: RatingStore + 'static,
{
    async fn create_laptop(
        &self,
        request: Request<CreateLaptopRequest>,
    ) -> Result<Response<CreateLaptopResponse>, Status> {
        let deadline = deadline(request.metadata());
        let response = self
            .service
            .create_laptop(request.into_inner(), &deadline)?;
        Ok(Response::new(response))
    }

    type SearchLaptopStream = ResponseStream<SearchLaptopResponse>;

    async fn search_laptop(
        &self,
        request: Request<SearchLaptopRequest>,
    ) -> Result<Response<Self::SearchLaptopStream>, Status> {
        let deadline = deadline(request.metadata());
        let rx = self.service.search_laptop(request.into_inner(), deadline);
        Ok(Response::new(into_status_stream(rx)))
    }

    async fn upload_image(
        &self,
        request: Request<Streaming<UploadImageRequest>>,
    ) -> Result<Response<UploadImageResponse>, Status> {
        let response = self.service.upload_image(request.into_inner()).await?;
        Ok(Response::new(response))
    }

    type RateLaptopStream = ResponseStream<RateLaptopResponse>;

    async fn rate_laptop(
        &self,
        request: Request<Streaming<RateLaptopRequest>>,
    ) -> Result<Response<Self::RateLaptopStream>, Status> {
        let rx = self.service.rate_laptop(request.into_inner());
        Ok(Response::new(into_status_stream(rx)))
    }
}

fn into_status_stream<T: Send + 'static>(
    rx: mpsc::Receiver<Result<T, ServiceError>>,
) -> ResponseStream<T> {
    Box::pin(ReceiverStream::new(rx).map(|item| item.map_err(Status::from)))
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

/// The call's deadline from its `grpc-timeout` header, if the client set one.
pub fn deadline(metadata: &MetadataMap) -> Deadline {
    metadata
        .get("grpc-timeout")
        .and_then(|value| value.to_str().ok())
        .and_then(parse_grpc_timeout)
        .map(Deadline::after)
        .unwrap_or_default()
}

/// Parse a `grpc-timeout` value: at most 8 digits followed by one of
/// `H`, `M`, `S`, `m`, `u`, `n`.
fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if !value.is_ascii() || value.len() < 2 {
        return None;
    }

    let (digits, unit) = value.split_at(value.len() - 1);
    if digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(amount * 60 * 60)),
        "M" => Some(Duration::from_secs(amount * 60)),
        "S" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_millis(amount)),
        "u" => Some(Duration::from_micros(amount)),
        "n" => Some(Duration::from_nanos(amount)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Create a `LaptopServiceServer` from a shared service.
pub fn laptop_service_server<L, I, R>(
    service: Arc<service::LaptopService<L, I, R>>,
) -> LaptopServiceServer<GrpcHandler<L, I, R>>
where
    L: LaptopStore + 'static,
    I: ImageStore + 'static,
    R: RatingStore + 'static,
{
    LaptopServiceServer::new(GrpcHandler::new(service))
}

/// Bind and serve the laptop service at `addr`.
pub async fn serve<L, I, R>(
    service: Arc<service::LaptopService<L, I, R>>,
    addr: SocketAddr,
) -> Result<(), tonic::transport::Error>
where
    L: LaptopStore + 'static,
    I: ImageStore + 'static,
    R: RatingStore + 'static,
{
    info!(%addr, "serving laptop service");
    tonic::transport::Server::builder()
        .add_service(laptop_service_server(service))
        .serve(addr)
        .await
}

/// Like [`serve`], stopping gracefully when `signal` completes.
pub async fn serve_with_shutdown<L, I, R, F>(
    service: Arc<service::LaptopService<L, I, R>>,
    addr: SocketAddr,
    signal: F,
) -> Result<(), tonic::transport::Error>
where
    L: LaptopStore + 'static,
    I: ImageStore + 'static,
    R: RatingStore + 'static,
    F: Future<Output = ()>,
{
    info!(%addr, "serving laptop service");
    tonic::transport::Server::builder()
        .add_service(laptop_service_server(service))
        .serve_with_shutdown(addr, signal)
        .await
}
