use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ImageStoreError {
    /// The image type would not make a safe file extension.
    InvalidImageType(String),
    Io(io::Error),
    LockPoisoned(&'static str),
}

impl fmt::Display for ImageStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageStoreError::InvalidImageType(image_type) => {
                write!(f, "invalid image type: {:?}", image_type)
            }
            ImageStoreError::Io(e) => write!(f, "image io error: {}", e),
            ImageStoreError::LockPoisoned(operation) => {
                write!(f, "image store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for ImageStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageStoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ImageStoreError {
    fn from(err: io::Error) -> Self {
        ImageStoreError::Io(err)
    }
}
