use attachstore_core::ParamStore;
use serde::{Deserialize, Serialize};

use crate::error::S3Error;

/// Parameter keys read by [`S3Config::from_params`].
pub mod keys {
    /// Target bucket. Required.
    pub const BUCKET: &str = "aws_bucket_name";
    /// AWS region. Defaults to `us-east-1`.
    pub const REGION: &str = "aws_region";
    /// Endpoint override for S3-compatible services.
    pub const ENDPOINT_URL: &str = "aws_endpoint_url";
    /// Static access key ID. Must be set together with the secret.
    pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
    /// Static secret access key.
    pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
    /// IAM role to assume via STS.
    pub const ROLE_ARN: &str = "aws_role_arn";
    /// External ID for cross-account trust policies.
    pub const EXTERNAL_ID: &str = "aws_external_id";
    /// `"true"`/`"1"` to use path-style addressing.
    pub const FORCE_PATH_STYLE: &str = "aws_force_path_style";
    /// Prefix prepended to every object key.
    pub const KEY_PREFIX: &str = "aws_prefix_file_name";
}

const DEFAULT_REGION: &str = "us-east-1";

/// Static access key pair.
#[derive(Clone, Serialize, Deserialize)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .finish()
    }
}

/// Shared AWS client configuration.
///
/// Contains the region, an endpoint URL override for S3-compatible services
/// (`MinIO`, `LocalStack`), optional static credentials and an optional STS
/// assume-role ARN. Without static credentials the SDK's environment
/// credential chain is used.
#[derive(Clone, Serialize, Deserialize)]
pub struct AwsBaseConfig {
    /// AWS region (e.g. `"us-east-1"`).
    pub region: String,

    /// Optional endpoint URL override.
    pub endpoint_url: Option<String>,

    /// Optional static credentials.
    #[serde(default)]
    pub credentials: Option<StaticCredentials>,

    /// Optional IAM role ARN to assume via STS.
    #[serde(default)]
    pub role_arn: Option<String>,

    /// Optional STS session name (defaults to `"attachstore"`).
    #[serde(default)]
    pub session_name: Option<String>,

    /// Optional external ID for cross-account trust policies.
    #[serde(default)]
    pub external_id: Option<String>,
}

impl std::fmt::Debug for AwsBaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsBaseConfig")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("credentials", &self.credentials)
            .field("role_arn", &self.role_arn.as_ref().map(|_| "[REDACTED]"))
            .field("session_name", &self.session_name)
            .field("external_id", &self.external_id)
            .finish()
    }
}

impl AwsBaseConfig {
    /// Create a new `AwsBaseConfig` with the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            credentials: None,
            role_arn: None,
            session_name: None,
            external_id: None,
        }
    }
}

impl Default for AwsBaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

/// Configuration for remote attachment storage.
#[derive(Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Shared AWS configuration.
    #[serde(flatten)]
    pub aws: AwsBaseConfig,

    /// Target bucket.
    pub bucket: String,

    /// Key prefix for all objects (e.g. `"prod_"`).
    #[serde(default)]
    pub prefix: Option<String>,

    /// Use path-style addressing (`<endpoint>/<bucket>/<key>`).
    #[serde(default)]
    pub force_path_style: bool,
}

impl std::fmt::Debug for S3Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Config")
            .field("aws", &self.aws)
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

impl S3Config {
    /// Create a new `S3Config` for `bucket` in the default region.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            aws: AwsBaseConfig::default(),
            bucket: bucket.into(),
            prefix: None,
            force_path_style: false,
        }
    }

    /// Read the configuration from a parameter store.
    ///
    /// Fails when the bucket is missing or only half of a static key pair is
    /// set. Blank values count as unset.
    pub fn from_params(params: &dyn ParamStore) -> Result<Self, S3Error> {
        let bucket = params
            .get_non_empty(keys::BUCKET)
            .ok_or_else(|| S3Error::Configuration(format!("'{}' is not set", keys::BUCKET)))?;

        let credentials = match (
            params.get_non_empty(keys::ACCESS_KEY_ID),
            params.get_non_empty(keys::SECRET_ACCESS_KEY),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            (None, None) => None,
            _ => {
                return Err(S3Error::CredentialError(format!(
                    "'{}' and '{}' must be set together",
                    keys::ACCESS_KEY_ID,
                    keys::SECRET_ACCESS_KEY
                )));
            }
        };

        let force_path_style = params
            .get_non_empty(keys::FORCE_PATH_STYLE)
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        Ok(Self {
            aws: AwsBaseConfig {
                region: params
                    .get_non_empty(keys::REGION)
                    .unwrap_or_else(|| DEFAULT_REGION.to_owned()),
                endpoint_url: params.get_non_empty(keys::ENDPOINT_URL),
                credentials,
                role_arn: params.get_non_empty(keys::ROLE_ARN),
                session_name: None,
                external_id: params.get_non_empty(keys::EXTERNAL_ID),
            },
            bucket,
            // The prefix is used verbatim, so only an empty value counts as unset.
            prefix: params.get_param(keys::KEY_PREFIX).filter(|p| !p.is_empty()),
            force_path_style,
        })
    }

    /// Set the AWS region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.aws.region = region.into();
        self
    }

    /// Set the key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the endpoint URL override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.aws.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Use a static access key pair instead of the environment chain.
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.aws.credentials = Some(StaticCredentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        });
        self
    }

    /// Set the IAM role ARN to assume.
    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.aws.role_arn = Some(role_arn.into());
        self
    }

    /// Set the STS session name for assume-role.
    #[must_use]
    pub fn with_session_name(mut self, session_name: impl Into<String>) -> Self {
        self.aws.session_name = Some(session_name.into());
        self
    }

    /// Set the external ID for cross-account trust policies.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.aws.external_id = Some(external_id.into());
        self
    }

    /// Use path-style addressing.
    #[must_use]
    pub fn with_force_path_style(mut self, force_path_style: bool) -> Self {
        self.force_path_style = force_path_style;
        self
    }

    /// Direct-access URL for an object key in this bucket.
    ///
    /// With an endpoint override (or path-style addressing) this is
    /// `<endpoint>/<bucket>/<key>`; otherwise the virtual-hosted AWS form
    /// `https://<bucket>.s3.<region>.amazonaws.com/<key>`.
    pub fn object_url(&self, key: &str) -> String {
        match (&self.aws.endpoint_url, self.force_path_style) {
            (Some(endpoint), _) => {
                format!("{}/{}/{key}", endpoint.trim_end_matches('/'), self.bucket)
            }
            (None, true) => format!(
                "https://s3.{}.amazonaws.com/{}/{key}",
                self.aws.region, self.bucket
            ),
            (None, false) => format!(
                "https://{}.s3.{}.amazonaws.com/{key}",
                self.bucket, self.aws.region
            ),
        }
    }
}
