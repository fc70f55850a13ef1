//! S3-compatible remote storage for attachstore.
//!
//! - [`S3Config`]: bucket, key prefix, region, endpoint override, credentials
//!   and optional STS assume-role, readable from a [`ParamStore`]
//! - [`S3ObjectStore`]: the [`ObjectStore`] protocol over `aws-sdk-s3`
//! - [`S3ConnectionResolver`]: re-reads the parameters on every call and
//!   hands back a [`ConnectionHandle`], or `None` when configuration is
//!   incomplete
//!
//! [`ParamStore`]: attachstore_core::ParamStore
//! [`ObjectStore`]: attachstore_core::ObjectStore
//! [`ConnectionHandle`]: attachstore_core::ConnectionHandle

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resolver;

pub use client::S3ObjectStore;
pub use config::{AwsBaseConfig, S3Config, StaticCredentials};
pub use error::S3Error;
pub use resolver::S3ConnectionResolver;
