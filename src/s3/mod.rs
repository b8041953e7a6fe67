pub mod acl;
pub mod actions;
pub mod config;
pub mod credentials;
pub mod error;
pub mod region;
pub mod request;
pub mod responses;
pub mod signature;
pub mod tools;

pub use self::{
    acl::CannedAcl,
    actions::BucketCreationRequest,
    config::EndpointConfiguration,
    credentials::Credentials,
    error::{ConfigurationError, StorageError, StorageErrorKind},
    region::Region,
    signature::Signature,
};

use secrecy::ExposeSecret;
use std::{fmt, time::Duration};
use url::Url;

/// Client bound to one endpoint configuration, cheap to clone and share.
#[derive(Debug, Clone)]
pub struct S3 {
    // AWS Credentials
    credentials: Credentials,
    // AWS Region
    region: Region,
    // base url, the bucket goes in the path
    endpoint: Url,
    // connect and request timeout
    timeout: Duration,
    // shared connection pool
    client: reqwest::Client,
}

// Amazon S3 API Reference
// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>
impl S3 {
    /// Validates the configuration and builds the client, no network I/O happens here.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a required field is empty, the region is unknown and no
    /// endpoint is set, or the endpoint is not a valid http(s) url
    pub fn create_client(config: EndpointConfiguration) -> Result<Self, ConfigurationError> {
        let EndpointConfiguration {
            region,
            endpoint_url,
            access_key,
            secret_key,
            timeout,
        } = config;

        if access_key.is_empty() {
            return Err(ConfigurationError::EmptyAccessKey);
        }

        if secret_key.expose_secret().is_empty() {
            return Err(ConfigurationError::EmptySecretKey);
        }

        if region.is_empty() {
            return Err(ConfigurationError::EmptyRegion);
        }

        if timeout.is_zero() {
            return Err(ConfigurationError::ZeroTimeout);
        }

        let region = match endpoint_url {
            Some(url) => Region::Custom {
                name: region,
                endpoint: url,
            },
            None => region
                .parse::<Region>()
                .map_err(|e| ConfigurationError::Region(e.to_string()))?,
        };

        let endpoint = parse_endpoint(&region.endpoint())?;

        let client = reqwest::Client::builder()
            .user_agent(signature::APP_USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        Ok(Self {
            credentials: Credentials::new(&access_key, &secret_key),
            region,
            endpoint,
            timeout,
            client,
        })
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) const fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl fmt::Display for S3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "access key: {}", self.credentials.aws_access_key_id())?;
        writeln!(f, "region: {}", self.region.name())?;
        writeln!(f, "endpoint: {}", self.endpoint)?;
        write!(f, "timeout: {:?}", self.timeout)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigurationError> {
    let invalid = |reason: &str| ConfigurationError::Endpoint {
        url: endpoint.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }

    Ok(url)
}

/// Build a client from the configuration, see [`S3::create_client`].
///
/// # Errors
///
/// Will return `Err` if the configuration is not valid
pub fn create_client(config: EndpointConfiguration) -> Result<S3, ConfigurationError> {
    S3::create_client(config)
}

/// Create a bucket, `AlreadyExists` is reported as an error and left to the caller.
///
/// # Errors
///
/// Will return `Err` with the [`StorageErrorKind`] describing the failure
pub async fn create_bucket(s3: &S3, request: &BucketCreationRequest) -> Result<(), StorageError> {
    actions::CreateBucket::new(&request.bucket_name, request.acl)
        .request(s3)
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let config = EndpointConfiguration::new("us-east-1", "123", "456")
            .with_endpoint("http://localhost:8202")
            .with_timeout(Duration::from_secs(3));
        let s3 = create_client(config.clone()).unwrap();

        assert_eq!(s3.credentials().aws_access_key_id(), "123");
        assert_eq!(s3.credentials().aws_secret_access_key(), "456");
        assert_eq!(s3.region().name(), "us-east-1");
        assert_eq!(s3.endpoint().as_str(), "http://localhost:8202/");
        assert_eq!(s3.timeout(), Duration::from_secs(3));

        // the input is untouched
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8202"));
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_create_client_aws() {
        let s3 = create_client(EndpointConfiguration::new("eu-central-2", "a", "b")).unwrap();
        assert_eq!(s3.region(), &Region::EuCentral2);
        assert_eq!(
            s3.endpoint().as_str(),
            "https://s3.eu-central-2.amazonaws.com/"
        );
    }

    #[test]
    fn test_create_client_custom_region_name() {
        let s3 = create_client(
            EndpointConfiguration::new("garage", "a", "b").with_endpoint("https://s3.example.com"),
        )
        .unwrap();
        assert_eq!(s3.region().name(), "garage");
    }

    #[test]
    fn test_create_client_malformed_url() {
        let err = create_client(
            EndpointConfiguration::new("us-east-1", "123", "456").with_endpoint("not a url"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::Endpoint { .. }));

        for url in [
            "ftp://localhost:8202",
            "localhost:8202",
            "http://localhost:8202/?x=1",
            "",
        ] {
            assert!(
                create_client(EndpointConfiguration::new("us-east-1", "1", "2").with_endpoint(url))
                    .is_err(),
                "{url}"
            );
        }
    }

    #[test]
    fn test_create_client_missing_fields() {
        assert_eq!(
            create_client(EndpointConfiguration::new("us-east-1", "", "456")).unwrap_err(),
            ConfigurationError::EmptyAccessKey
        );
        assert_eq!(
            create_client(EndpointConfiguration::new("us-east-1", "123", "")).unwrap_err(),
            ConfigurationError::EmptySecretKey
        );
        assert_eq!(
            create_client(EndpointConfiguration::new("", "123", "456")).unwrap_err(),
            ConfigurationError::EmptyRegion
        );
        assert_eq!(
            create_client(
                EndpointConfiguration::new("us-east-1", "123", "456")
                    .with_timeout(Duration::ZERO)
            )
            .unwrap_err(),
            ConfigurationError::ZeroTimeout
        );
    }

    #[test]
    fn test_create_client_unknown_region() {
        let err = create_client(EndpointConfiguration::new("xx-region-y", "a", "b")).unwrap_err();
        assert!(matches!(err, ConfigurationError::Region(_)));
        assert!(err.to_string().contains("xx-region-y"));
    }

    #[test]
    fn test_display_hides_secret() {
        let s3 = create_client(
            EndpointConfiguration::new("us-east-1", "123", "s3cr3t")
                .with_endpoint("http://localhost:8202"),
        )
        .unwrap();
        let display = s3.to_string();
        assert!(display.contains("endpoint: http://localhost:8202/"));
        assert!(!display.contains("s3cr3t"));
        assert!(!format!("{s3:?}").contains("s3cr3t"));
    }

    #[tokio::test]
    async fn test_create_bucket() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/foo-bar")
            .match_header("x-amz-acl", "public-read-write")
            .with_status(200)
            .create_async()
            .await;

        let s3 = create_client(
            EndpointConfiguration::new("us-east-1", "123", "456").with_endpoint(&server.url()),
        )
        .unwrap();

        let request = BucketCreationRequest::new("foo-bar", CannedAcl::PublicReadWrite);
        assert_eq!(create_bucket(&s3, &request).await, Ok(()));
        mock.assert_async().await;
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<S3>();
    }
}
