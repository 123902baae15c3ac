use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload to bucket failed: {0}")]
    Upload(String),

    #[error("delete from bucket failed: {0}")]
    Delete(String),

    #[error("object url not recognized: {0}")]
    BadUrl(String),
}

/// Object-storage gateway: uploads and deletes blobs in one bucket and
/// derives the public URL for uploaded objects.
#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
    region: String,
}

impl Storage {
    /// Build the S3 client from the standard SDK environment (region and
    /// credentials); the bucket name comes from application config.
    pub async fn from_env(bucket: String) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "us-east-1".to_string());
        Self {
            client: Client::new(&sdk_config),
            bucket,
            region,
        }
    }

    /// Upload a blob under `key` with public-read access and return its URL.
    pub async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .acl(ObjectCannedAcl::PublicRead)
            .content_type(content_type)
            .content_disposition("inline")
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        info!("uploaded object {} to bucket {}", key, self.bucket);
        Ok(self.public_url(key))
    }

    /// Delete the object a previously returned URL points at.
    pub async fn remove(&self, url: &str) -> Result<(), StorageError> {
        let key = Self::key_from_url(url)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete(e.to_string()))?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }

    fn key_from_url(url: &str) -> Result<&str, StorageError> {
        url.split(".amazonaws.com/")
            .nth(1)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| StorageError::BadUrl(url.to_string()))
    }
}
