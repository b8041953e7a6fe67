//! Common test helpers for e2e integration tests
//!
//! - `MinioContext`: `MinIO` test environment (external or container-based)
//! - Config file helpers: temporary s3cb config files
//! - Binary helpers: run s3cb with a generated config

#![allow(dead_code, clippy::indexing_slicing)]

mod helpers;

pub use helpers::minio::{MINIO_ROOT_PASSWORD, MINIO_ROOT_USER, MinioContainer};

use reqwest::Method;
use s3cb::s3::{EndpointConfiguration, S3, Signature, create_client, tools::sha256_digest_string};
use std::env;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// Create a temporary config.yml file with a single host named `s3`
pub fn create_config_file(endpoint: &str, access_key: &str, secret_key: &str) -> NamedTempFile {
    let config_content = format!(
        r#"---
hosts:
  s3:
    endpoint: {}
    region: us-east-1
    access_key: "{}"
    secret_key: "{}"
"#,
        endpoint, access_key, secret_key
    );

    let mut config_file = NamedTempFile::new().expect("Failed to create temp config file");
    config_file
        .write_all(config_content.as_bytes())
        .expect("Failed to write config");
    config_file.flush().expect("Failed to flush config");
    config_file
}

/// Bucket name unlikely to collide between runs against the same server
pub fn unique_bucket_name(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_subsec_nanos();
    format!("{}-{}-{}", prefix, std::process::id(), nanos)
}

/// `MinIO` test context - either external or testcontainer-based
pub enum MinioContext {
    External {
        endpoint: String,
        access_key: String,
        secret_key: String,
    },
    Container(Box<MinioContainer>),
}

impl MinioContext {
    /// Uses an external `MinIO` if `MINIO_ENDPOINT` is set, otherwise starts a container
    pub async fn get_or_start() -> Self {
        if let Ok(endpoint) = env::var("MINIO_ENDPOINT") {
            let access_key =
                env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| MINIO_ROOT_USER.to_string());
            let secret_key =
                env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| MINIO_ROOT_PASSWORD.to_string());

            println!("Using external MinIO at {endpoint}");

            MinioContext::External {
                endpoint,
                access_key,
                secret_key,
            }
        } else {
            println!("Starting MinIO testcontainer");
            let container = MinioContainer::start().await;
            container.wait_for_ready().await.expect("MinIO ready");
            MinioContext::Container(Box::new(container))
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            MinioContext::External { endpoint, .. } => endpoint,
            MinioContext::Container(c) => c.endpoint(),
        }
    }

    pub fn access_key(&self) -> &str {
        match self {
            MinioContext::External { access_key, .. } => access_key,
            MinioContext::Container(c) => &c.access_key,
        }
    }

    pub fn secret_key(&self) -> &str {
        match self {
            MinioContext::External { secret_key, .. } => secret_key,
            MinioContext::Container(c) => &c.secret_key,
        }
    }

    pub fn configuration(&self) -> EndpointConfiguration {
        EndpointConfiguration::new("us-east-1", self.access_key(), self.secret_key())
            .with_endpoint(self.endpoint())
    }

    pub fn client(&self) -> S3 {
        create_client(self.configuration()).expect("Failed to create client")
    }

    /// Signed `GET /<bucket>`, succeeds only if the bucket exists and can be listed
    pub async fn list_objects_status(&self, bucket: &str) -> u16 {
        let s3 = self.client();
        let url = s3.endpoint().join(bucket).expect("Invalid bucket url");

        let mut signature = Signature::new(&s3, Method::GET, &url);
        let headers = signature.sign(&sha256_digest_string(""), None, None);

        let mut request = reqwest::Client::new().get(url);
        for (k, v) in &headers {
            request = request.header(k, v);
        }

        request
            .send()
            .await
            .expect("Failed to list bucket")
            .status()
            .as_u16()
    }
}

/// Path to the s3cb binary built by cargo for integration tests
pub fn s3cb_binary() -> &'static str {
    env!("CARGO_BIN_EXE_s3cb")
}

/// Run s3cb with a config file pointing to the given endpoint
pub fn run_s3cb_with_endpoint(
    endpoint: &str,
    access_key: &str,
    secret_key: &str,
    args: &[&str],
) -> Output {
    let config_file = create_config_file(endpoint, access_key, secret_key);
    let config_path = config_file.path().to_str().expect("Invalid config path");

    let output = Command::new(s3cb_binary())
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .expect("Failed to execute s3cb");

    // Keep config_file alive until command completes
    drop(config_file);

    output
}

/// Run s3cb with `MinIO` context - creates config file automatically
pub fn run_s3cb_with_minio(minio: &MinioContext, args: &[&str]) -> Output {
    run_s3cb_with_endpoint(minio.endpoint(), minio.access_key(), minio.secret_key(), args)
}

/// Run s3cb without config (for --version, --help, etc.)
pub fn run_s3cb(args: &[&str]) -> Output {
    Command::new(s3cb_binary())
        .args(args)
        .output()
        .expect("Failed to execute s3cb")
}
