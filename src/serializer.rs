//! Laptop files: protobuf binary and JSON.
//!
//! JSON keeps the protobuf field names and default values, writes enums by
//! name (`"GIGABYTE"`) and `updated_at` as an RFC 3339 string.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use prost::Message;

use crate::model::Laptop;

#[derive(Debug)]
pub enum SerializerError {
    Io(io::Error),
    Decode(prost::DecodeError),
    Json(serde_json::Error),
}

impl fmt::Display for SerializerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializerError::Io(e) => write!(f, "laptop file io error: {}", e),
            SerializerError::Decode(e) => write!(f, "cannot decode laptop: {}", e),
            SerializerError::Json(e) => write!(f, "laptop json error: {}", e),
        }
    }
}

impl std::error::Error for SerializerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializerError::Io(e) => Some(e),
            SerializerError::Decode(e) => Some(e),
            SerializerError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for SerializerError {
    fn from(err: io::Error) -> Self {
        SerializerError::Io(err)
    }
}

impl From<prost::DecodeError> for SerializerError {
    fn from(err: prost::DecodeError) -> Self {
        SerializerError::Decode(err)
    }
}

impl From<serde_json::Error> for SerializerError {
    fn from(err: serde_json::Error) -> Self {
        SerializerError::Json(err)
    }
}

pub fn write_binary_file(laptop: &Laptop, path: impl AsRef<Path>) -> Result<(), SerializerError> {
    fs::write(path, laptop.encode_to_vec())?;
    Ok(())
}

pub fn read_binary_file(path: impl AsRef<Path>) -> Result<Laptop, SerializerError> {
    let bytes = fs::read(path)?;
    Ok(Laptop::decode(bytes.as_slice())?)
}

/// Pretty JSON with field names as declared and every default value
/// written out.
pub fn to_json(laptop: &Laptop) -> Result<String, SerializerError> {
    Ok(serde_json::to_string_pretty(laptop)?)
}

pub fn write_json_file(laptop: &Laptop, path: impl AsRef<Path>) -> Result<(), SerializerError> {
    fs::write(path, to_json(laptop)?)?;
    Ok(())
}

pub fn read_json_file(path: impl AsRef<Path>) -> Result<Laptop, SerializerError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
