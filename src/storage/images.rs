use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::config::UploadConfig;

/// Accepted upload MIME types and their file extensions. Anything else is
/// rejected before a byte is written.
const FILE_TYPE_MAP: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpeg"),
    ("image/jpg", "jpg"),
];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid image extension: {0}")]
    InvalidExtension(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes uploaded images into the shared uploads directory and knows the
/// public URL they are served back under. Filenames carry a millisecond
/// timestamp; the directory is append-only with no collision detection.
pub struct ImageStore {
    dir: PathBuf,
    public_path: String,
}

impl ImageStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            public_path: config.public_path.clone(),
        }
    }

    pub fn extension_for(mime: &str) -> Option<&'static str> {
        FILE_TYPE_MAP
            .iter()
            .find(|(accepted, _)| *accepted == mime)
            .map(|(_, ext)| *ext)
    }

    /// Destination filename:
    /// `<original-name-with-first-space-replaced-by-dash>-<unix-millis>.<ext>`.
    /// The original name is reduced to its final path component first.
    pub fn destination_name(original: &str, mime: &str, millis: i64) -> Result<String, StoreError> {
        let ext = Self::extension_for(mime)
            .ok_or_else(|| StoreError::InvalidExtension(mime.to_string()))?;
        let base = Path::new(original)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::InvalidFileName(original.to_string()))?;
        let base = base.replacen(' ', "-", 1);
        Ok(format!("{base}-{millis}.{ext}"))
    }

    /// Validate and persist one uploaded file, returning the stored
    /// filename. Nothing is written when the MIME type is not allowed.
    pub async fn save(&self, original: &str, mime: &str, bytes: &[u8]) -> Result<String, StoreError> {
        let name = Self::destination_name(original, mime, Utc::now().timestamp_millis())?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        Ok(name)
    }

    /// Absolute public URL for a stored filename, built from the request's
    /// own base URL plus the static-serving path.
    pub fn public_url(&self, base: &str, filename: &str) -> String {
        format!("{}{}/{}", base.trim_end_matches('/'), self.public_path, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ImageStore {
        ImageStore {
            dir: PathBuf::from("public/uploads"),
            public_path: "/public/uploads".to_string(),
        }
    }

    #[test]
    fn maps_the_three_accepted_types() {
        assert_eq!(ImageStore::extension_for("image/png"), Some("png"));
        assert_eq!(ImageStore::extension_for("image/jpeg"), Some("jpeg"));
        assert_eq!(ImageStore::extension_for("image/jpg"), Some("jpg"));
        assert_eq!(ImageStore::extension_for("image/gif"), None);
        assert_eq!(ImageStore::extension_for("application/pdf"), None);
    }

    #[test]
    fn destination_name_replaces_first_space_only() {
        let name = ImageStore::destination_name("my product shot.png", "image/png", 1700000000000)
            .unwrap();
        assert_eq!(name, "my-product shot.png-1700000000000.png");
    }

    #[test]
    fn destination_name_rejects_unlisted_mime() {
        let err = ImageStore::destination_name("a.gif", "image/gif", 0).unwrap_err();
        assert!(matches!(err, StoreError::InvalidExtension(_)));
        assert!(err.to_string().contains("Invalid image extension"));
    }

    #[test]
    fn destination_name_drops_path_components() {
        let name = ImageStore::destination_name("../../etc/passwd.png", "image/png", 7).unwrap();
        assert_eq!(name, "passwd.png-7.png");
    }

    #[tokio::test]
    async fn save_persists_accepted_files_and_rejects_others() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore {
            dir: tmp.path().to_path_buf(),
            public_path: "/public/uploads".to_string(),
        };

        let name = store.save("cover.png", "image/png", b"png-bytes").await.unwrap();
        assert!(name.ends_with(".png"));
        let on_disk = tokio::fs::read(tmp.path().join(&name)).await.unwrap();
        assert_eq!(on_disk, b"png-bytes");

        let err = store.save("cover.bmp", "image/bmp", b"bmp-bytes").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidExtension(_)));
        // the rejected file was never written
        let mut entries = tokio::fs::read_dir(tmp.path()).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn public_url_is_absolute_and_slash_safe() {
        let url = store().public_url("http://localhost:3000", "lamp-1.png");
        assert_eq!(url, "http://localhost:3000/public/uploads/lamp-1.png");
        let url = store().public_url("https://shop.example.com/", "lamp-1.png");
        assert_eq!(url, "https://shop.example.com/public/uploads/lamp-1.png");
    }
}
