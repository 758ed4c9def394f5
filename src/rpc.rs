//! Request and response envelopes for the four laptop RPCs.
//!
//! Declared with prost derives (standard protobuf wire format, no `.proto`
//! file). The service core consumes and produces these directly; the
//! `grpc` module only moves them over tonic.

use crate::model::{Filter, Laptop};

// ---------------------------------------------------------------------------
// CreateLaptop (unary)
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateLaptopRequest {
    #[prost(message, optional, tag = "1")]
    pub laptop: Option<Laptop>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateLaptopResponse {
    #[prost(string, tag = "1")]
    pub id: String,
}

// ---------------------------------------------------------------------------
// SearchLaptop (server streaming)
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchLaptopRequest {
    #[prost(message, optional, tag = "1")]
    pub filter: Option<Filter>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchLaptopResponse {
    #[prost(message, optional, tag = "1")]
    pub laptop: Option<Laptop>,
}

// ---------------------------------------------------------------------------
// UploadImage (client streaming)
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct ImageInfo {
    #[prost(string, tag = "1")]
    pub laptop_id: String,
    /// File extension including the dot, e.g. `.jpg`.
    #[prost(string, tag = "2")]
    pub image_type: String,
}

/// One upload message: the image info first, then raw chunks.
#[derive(Clone, PartialEq, prost::Message)]
pub struct UploadImageRequest {
    #[prost(oneof = "upload_image_request::Data", tags = "1, 2")]
    pub data: Option<upload_image_request::Data>,
}

pub mod upload_image_request {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "1")]
        Info(super::ImageInfo),
        #[prost(bytes = "vec", tag = "2")]
        ChunkData(Vec<u8>),
    }
}

impl UploadImageRequest {
    pub fn info(laptop_id: impl Into<String>, image_type: impl Into<String>) -> Self {
        Self {
            data: Some(upload_image_request::Data::Info(ImageInfo {
                laptop_id: laptop_id.into(),
                image_type: image_type.into(),
            })),
        }
    }

    pub fn chunk(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(upload_image_request::Data::ChunkData(bytes.into())),
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UploadImageResponse {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(uint32, tag = "2")]
    pub size: u32,
}

// ---------------------------------------------------------------------------
// RateLaptop (bidirectional streaming)
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct RateLaptopRequest {
    #[prost(string, tag = "1")]
    pub laptop_id: String,
    #[prost(double, tag = "2")]
    pub score: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RateLaptopResponse {
    #[prost(string, tag = "1")]
    pub laptop_id: String,
    #[prost(uint32, tag = "2")]
    pub rated_count: u32,
    #[prost(double, tag = "3")]
    pub average_score: f64,
}
