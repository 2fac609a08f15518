use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::error;

use crate::config::MediaConfig;
use crate::domain::errors::DomainError;
use crate::domain::media::{sanitize_file_name, ImageKind, ImageUpload};
use crate::domain::ports::ImageStorage;

/// Keeps one image per owner under `<root>/<kind>/<owner_id>/<file_name>`.
pub struct DiskImageStorage {
    root: PathBuf,
    base_url: String,
}

impl DiskImageStorage {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: config.root.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn owner_dir(&self, kind: ImageKind, owner_id: i32) -> PathBuf {
        self.root.join(kind.as_str()).join(owner_id.to_string())
    }
}

fn storage_error(action: &str, e: std::io::Error) -> DomainError {
    error!("image storage failed while {}: {}", action, e);
    DomainError::Storage(format!("error {action}"))
}

impl ImageStorage for DiskImageStorage {
    fn save(
        &self,
        kind: ImageKind,
        owner_id: i32,
        image: &ImageUpload,
    ) -> Result<String, DomainError> {
        let file_name = sanitize_file_name(&image.file_name)?;
        let dir = self.owner_dir(kind, owner_id);

        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(storage_error("deleting directory", e)),
        }
        fs::create_dir_all(&dir).map_err(|e| storage_error("creating directory", e))?;
        fs::write(dir.join(&file_name), &image.bytes)
            .map_err(|e| storage_error("creating file", e))?;

        Ok(format!(
            "{}/{}/{}/{}",
            self.base_url, kind, owner_id, file_name
        ))
    }

    fn remove(&self, kind: ImageKind, owner_id: i32) -> Result<(), DomainError> {
        match fs::remove_dir_all(self.owner_dir(kind, owner_id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("deleting directory", e)),
        }
    }

    fn file_path(
        &self,
        kind: ImageKind,
        owner_id: i32,
        file_name: &str,
    ) -> Result<PathBuf, DomainError> {
        let file_name = sanitize_file_name(file_name)?;
        let path = self.owner_dir(kind, owner_id).join(file_name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(DomainError::NotFound("file"))
        }
    }
}
