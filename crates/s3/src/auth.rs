use aws_config::retry::RetryConfig;
use aws_sdk_s3::config::Credentials;
use tracing::{debug, info};

use crate::config::AwsBaseConfig;

/// Build an AWS SDK configuration from the given [`AwsBaseConfig`].
///
/// Uses static credentials when configured, otherwise the standard
/// environment credential chain, and optionally:
/// - Overrides the endpoint URL for S3-compatible services
/// - Assumes an IAM role via STS if `role_arn` is configured, with automatic
///   credential refresh before expiry
///
/// SDK-level retries are disabled: each request is a single attempt.
///
/// # Examples
///
/// ```no_run
/// use attachstore_s3::config::AwsBaseConfig;
/// use attachstore_s3::auth::build_sdk_config;
///
/// # async fn example() {
/// let mut config = AwsBaseConfig::new("us-east-1");
/// config.endpoint_url = Some("http://localhost:9000".to_owned());
/// let sdk_config = build_sdk_config(&config).await;
/// # }
/// ```
pub async fn build_sdk_config(config: &AwsBaseConfig) -> aws_config::SdkConfig {
    let mut loader = aws_config::from_env()
        .region(aws_config::Region::new(config.region.clone()))
        .retry_config(RetryConfig::disabled());

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom S3 endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    if let Some(creds) = &config.credentials {
        debug!(access_key_id = %creds.access_key_id, "using static S3 credentials");
        loader = loader.credentials_provider(Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            None,
            None,
            "attachstore-params",
        ));
    }

    if let Some(role_arn) = &config.role_arn {
        let session_name = config.session_name.as_deref().unwrap_or("attachstore");

        info!(role_arn = %role_arn, session_name = %session_name, "assuming IAM role via STS (auto-refresh)");

        // The assume-role provider inherits the endpoint override and base
        // credentials for its STS calls.
        let base_config = loader.load().await;

        let mut provider_builder = aws_config::sts::AssumeRoleProvider::builder(role_arn)
            .session_name(session_name)
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(ref external_id) = config.external_id {
            provider_builder = provider_builder.external_id(external_id);
        }

        let assume_role_provider = provider_builder.configure(&base_config).build().await;

        let mut final_loader = aws_config::from_env()
            .region(aws_config::Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled())
            .credentials_provider(assume_role_provider);

        if let Some(endpoint) = &config.endpoint_url {
            final_loader = final_loader.endpoint_url(endpoint);
        }

        return final_loader.load().await;
    }

    loader.load().await
}
