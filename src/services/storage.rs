//! Object storage for uploaded images.
//!
//! Local filesystem storage is always available; the S3 backend is compiled
//! in with the `s3` feature.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Content types accepted by the image upload endpoint
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key '{0}'")]
    InvalidKey(String),

    #[error("object '{0}' not found")]
    NotFound(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Flat key/value object store addressed by filename.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key` and return its public URL.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, StorageError>;

    /// Remove the object stored under `key`.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL for `key`.
    fn public_url(&self, key: &str) -> String;

    /// Storage scheme (e.g., "local", "s3").
    fn scheme(&self) -> &'static str;
}

/// Keys are single path segments of `[A-Za-z0-9._-]`, never `.` or `..`
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 255
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Extension for a stored upload: the client filename's extension when it is
/// a plain alphanumeric suffix, otherwise one derived from the content type.
pub fn upload_extension(filename: Option<&str>, content_type: &str) -> &'static str {
    let from_name = filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match from_name.as_deref() {
        Some("jpg") => "jpg",
        Some("jpeg") => "jpeg",
        Some("png") => "png",
        Some("gif") => "gif",
        Some("webp") => "webp",
        _ => match content_type {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "jpg",
        },
    }
}

/// Local filesystem storage.
pub struct LocalObjectStorage {
    /// Directory holding uploaded files.
    base_path: PathBuf,
    /// Base URL the directory is served under.
    base_url: String,
}

impl LocalObjectStorage {
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            base_url: base_url.into(),
        }
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String, StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.base_path).await?;

        let mut file = fs::File::create(&path).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        debug!(key = %key, path = ?path, size = data.len(), "file written");
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key = %key, "file deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    fn scheme(&self) -> &'static str {
        "local"
    }
}

impl std::fmt::Debug for LocalObjectStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalObjectStorage")
            .field("base_path", &self.base_path)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// S3 bucket storage; objects are uploaded public-read.
#[cfg(feature = "s3")]
pub struct S3ObjectStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

#[cfg(feature = "s3")]
impl S3ObjectStorage {
    /// Uses the default AWS credential chain (env vars, config file, instance profile).
    pub async fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        let region = region.into();
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region.clone()))
            .load()
            .await;

        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket: bucket.into(),
            region,
        }
    }
}

#[cfg(feature = "s3")]
#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, StorageError> {
        validate_key(key)?;
        let size = data.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(data))
            .content_type(content_type)
            .acl(aws_sdk_s3::types::ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("failed to upload to S3: {}", e)))?;

        debug!(key = %key, bucket = %self.bucket, size, "file written to S3");
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("failed to delete from S3: {}", e)))?;

        debug!(key = %key, "file deleted from S3");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://{}.s3.{}.amazonaws.com/{}", self.bucket, self.region, key)
    }

    fn scheme(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_validation_blocks_traversal() {
        assert!(validate_key("3f2b.png").is_ok());
        assert!(validate_key("a_b-c.webp").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key(".env").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("dir/file.png").is_err());
        assert!(validate_key("dir\\file.png").is_err());
    }

    #[test]
    fn extension_prefers_filename() {
        assert_eq!(upload_extension(Some("photo.JPEG"), "image/jpeg"), "jpeg");
        assert_eq!(upload_extension(Some("diagram.png"), "image/png"), "png");
        assert_eq!(upload_extension(Some("noext"), "image/webp"), "webp");
        assert_eq!(upload_extension(Some("evil.php"), "image/gif"), "gif");
        assert_eq!(upload_extension(None, "image/jpeg"), "jpg");
    }

    #[tokio::test]
    async fn local_put_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "http://localhost:8000/uploads/");

        let url = storage.put("abc.png", vec![1, 2, 3], "image/png").await.unwrap();
        assert_eq!(url, "http://localhost:8000/uploads/abc.png");
        assert_eq!(std::fs::read(dir.path().join("abc.png")).unwrap(), vec![1, 2, 3]);

        storage.delete("abc.png").await.unwrap();
        assert!(!dir.path().join("abc.png").exists());
        assert!(matches!(
            storage.delete("abc.png").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn local_rejects_bad_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalObjectStorage::new(dir.path(), "http://localhost/uploads");
        assert!(matches!(
            storage.put("../x.png", vec![], "image/png").await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
