use async_trait::async_trait;
use attachstore_core::{ObjectStore, StoreError};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, error, info, instrument};

use crate::auth::build_sdk_config;
use crate::config::S3Config;
use crate::error::classify_sdk_error;

/// [`ObjectStore`] backed by `aws-sdk-s3`.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore")
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3ObjectStore {
    /// Build an SDK client for `config`.
    pub async fn new(config: &S3Config) -> Self {
        let sdk_config = build_sdk_config(&config.aws).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();
        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
        }
    }

    /// Wrap a pre-built client.
    pub fn with_client(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

fn sdk_failure(op: &str, err: &impl std::error::Error) -> StoreError {
    let err_str = DisplayErrorContext(err).to_string();
    error!(operation = op, error = %err_str, "S3 request failed");
    classify_sdk_error(&err_str).into()
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, body), fields(size = body.len()))]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StoreError> {
        debug!("uploading object to S3");
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| sdk_failure("put_object", &e))?;
        info!(bucket = %bucket, key = %key, "S3 object uploaded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        debug!("downloading object from S3");
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| sdk_failure("get_object", &e))?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Remote(format!("failed to read S3 body: {e}")))?
            .into_bytes();
        debug!(size = body.len(), "S3 object downloaded");
        Ok(body)
    }

    #[instrument(skip(self))]
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        match self.client.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(HeadObjectError::is_not_found) => {
                debug!("S3 object not found");
                Ok(false)
            }
            Err(e) => Err(sdk_failure("head_object", &e)),
        }
    }
}
