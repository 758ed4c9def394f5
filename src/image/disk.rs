use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use super::{ImageStore, ImageStoreError};

/// Writes each image to `<folder>/<image id><image type>`.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    folder: PathBuf,
}

impl DiskImageStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        let folder = folder.into();
        info!(path = %folder.display(), "disk image store configured");
        Self { folder }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn image_path(&self, image_id: &str, image_type: &str) -> PathBuf {
        self.folder.join(format!("{}{}", image_id, image_type))
    }
}

/// Image types are file extensions such as `.jpg`; anything that could
/// leave the folder is refused.
fn check_image_type(image_type: &str) -> Result<(), ImageStoreError> {
    let unsafe_type = image_type.contains('/')
        || image_type.contains('\\')
        || image_type.contains("..")
        || image_type.contains('\0');
    if unsafe_type {
        return Err(ImageStoreError::InvalidImageType(image_type.to_string()));
    }
    Ok(())
}

impl ImageStore for DiskImageStore {
    fn save(
        &self,
        laptop_id: &str,
        image_type: &str,
        data: &[u8],
    ) -> Result<String, ImageStoreError> {
        check_image_type(image_type)?;
        fs::create_dir_all(&self.folder)?;

        let image_id = Uuid::new_v4().to_string();
        let path = self.image_path(&image_id, image_type);
        fs::write(&path, data)?;

        debug!(
            image_id = %image_id,
            laptop_id = %laptop_id,
            size = data.len(),
            path = %path.display(),
            "stored image"
        );
        Ok(image_id)
    }
}
