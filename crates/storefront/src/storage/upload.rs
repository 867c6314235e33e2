use crate::domain::requests::product::ImageUpload;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// URL prefix under which the upload directory is served.
pub const UPLOADS_ROUTE: &str = "uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only image uploads are allowed, got {0}")]
    NotAnImage(String),

    #[error("Uploaded image is empty")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes product images to a local directory under random names.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores the image and returns its public path, `uploads/<file>`.
    pub async fn save(&self, upload: &ImageUpload) -> Result<String, UploadError> {
        let content_type = upload
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream");

        if !content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage(content_type.to_string()));
        }

        if upload.bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        let file_name = stored_file_name(upload.file_name.as_deref(), content_type);

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            error!("❌ Failed to create upload dir {:?}: {:?}", self.dir, e);
            e
        })?;

        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, &upload.bytes).await.map_err(|e| {
            error!("❌ Failed to write upload {:?}: {:?}", path, e);
            e
        })?;

        info!("🖼️ Stored image {} ({} bytes)", file_name, upload.bytes.len());

        Ok(format!("{UPLOADS_ROUTE}/{file_name}"))
    }

    /// Deletes a file previously returned by [`UploadStore::save`].
    pub async fn remove(&self, public_path: &str) {
        let Some(file_name) = public_path
            .strip_prefix(UPLOADS_ROUTE)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.contains(['/', '\\']) && !name.starts_with('.'))
        else {
            warn!("⚠️ Refusing to remove unexpected upload path {public_path}");
            return;
        };

        let path = self.dir.join(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => info!("🗑️ Removed orphaned image {file_name}"),
            Err(e) => warn!("⚠️ Failed to remove {:?}: {:?}", path, e),
        }
    }
}

fn stored_file_name(original: Option<&str>, content_type: &str) -> String {
    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| is_safe_extension(ext))
        .map(str::to_ascii_lowercase)
        .or_else(|| extension_for(content_type).map(str::to_string));

    match extension {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}

fn is_safe_extension(ext: &str) -> bool {
    !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(file_name: Option<&str>, content_type: Option<&str>) -> ImageUpload {
        ImageUpload {
            file_name: file_name.map(str::to_string),
            content_type: content_type.map(str::to_string),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn saves_under_random_name_keeping_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let first = store
            .save(&upload(Some("Headphones.PNG"), Some("image/png")))
            .await
            .unwrap();
        let second = store
            .save(&upload(Some("Headphones.PNG"), Some("image/png")))
            .await
            .unwrap();

        assert!(first.starts_with("uploads/"));
        assert!(first.ends_with(".png"));
        assert_ne!(first, second);

        let stored = dir.path().join(first.trim_start_matches("uploads/"));
        assert_eq!(std::fs::read(stored).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn rejects_non_image_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let err = store
            .save(&upload(Some("notes.txt"), Some("text/plain")))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::NotAnImage(ct) if ct == "text/plain"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn remove_deletes_only_stored_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());
        let keep = dir.path().join("keep.txt");
        std::fs::write(&keep, b"x").unwrap();

        let saved = store
            .save(&upload(Some("a.png"), Some("image/png")))
            .await
            .unwrap();
        store.remove(&saved).await;
        store.remove("uploads/../keep.txt").await;

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(keep.exists());
    }

    #[test]
    fn falls_back_to_content_type_extension() {
        let name = stored_file_name(Some("blob"), "image/jpeg");
        assert!(name.ends_with(".jpg"));

        let name = stored_file_name(Some("../../etc/passwd.$$"), "image/x-unknown");
        assert!(!name.contains('.'));
        assert!(!name.contains('/'));
    }
}
