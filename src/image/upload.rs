//! ImageUpload - per-call buffer for a chunked image upload.
//!
//! The first message names the laptop and image type; every later message
//! is a chunk appended to the buffer. The total never exceeds the ceiling,
//! so a misbehaving client cannot grow the buffer without bound.

use std::fmt;

/// Upload ceiling: 1 MiB.
pub const MAX_IMAGE_SIZE: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// A chunk arrived, or the stream ended, before the image info.
    MissingInfo,
    /// Image info arrived a second time.
    InfoAlreadyReceived,
    /// Accepting the chunk would push the image past the ceiling.
    TooLarge { size: usize, max: usize },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::MissingInfo => write!(f, "image info wasn't sent before"),
            UploadError::InfoAlreadyReceived => write!(f, "image info was already sent"),
            UploadError::TooLarge { size, max } => {
                write!(f, "image is too large: {} > {}", size, max)
            }
        }
    }
}

impl std::error::Error for UploadError {}

#[derive(Debug)]
enum State {
    AwaitingInfo,
    Accumulating {
        laptop_id: String,
        image_type: String,
        data: Vec<u8>,
    },
}

/// A finished upload, ready for an `ImageStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledImage {
    pub laptop_id: String,
    pub image_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct ImageUpload {
    state: State,
    max_size: usize,
}

impl Default for ImageUpload {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageUpload {
    pub fn new() -> Self {
        Self::with_max_size(MAX_IMAGE_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            state: State::AwaitingInfo,
            max_size,
        }
    }

    pub fn has_info(&self) -> bool {
        matches!(self.state, State::Accumulating { .. })
    }

    /// Bytes accumulated so far.
    pub fn size(&self) -> usize {
        match &self.state {
            State::AwaitingInfo => 0,
            State::Accumulating { data, .. } => data.len(),
        }
    }

    /// Start accumulating for `laptop_id`. The caller checks the laptop
    /// exists first.
    pub fn begin(&mut self, laptop_id: String, image_type: String) -> Result<(), UploadError> {
        if self.has_info() {
            return Err(UploadError::InfoAlreadyReceived);
        }
        self.state = State::Accumulating {
            laptop_id,
            image_type,
            data: Vec::new(),
        };
        Ok(())
    }

    /// Append a chunk, returning the new total size. A rejected chunk
    /// leaves the buffer untouched.
    pub fn append(&mut self, chunk: &[u8]) -> Result<usize, UploadError> {
        let max = self.max_size;
        let State::Accumulating { data, .. } = &mut self.state else {
            return Err(UploadError::MissingInfo);
        };

        let size = data.len() + chunk.len();
        if size > max {
            return Err(UploadError::TooLarge { size, max });
        }

        data.extend_from_slice(chunk);
        Ok(size)
    }

    pub fn finish(self) -> Result<AssembledImage, UploadError> {
        match self.state {
            State::AwaitingInfo => Err(UploadError::MissingInfo),
            State::Accumulating {
                laptop_id,
                image_type,
                data,
            } => Ok(AssembledImage {
                laptop_id,
                image_type,
                data,
            }),
        }
    }
}
