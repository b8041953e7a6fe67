use crate::s3::{
    S3,
    acl::CannedAcl,
    actions::{Action, response_error},
    error::{StorageError, StorageErrorKind},
    request,
    tools::sha256_digest_string,
};
use quick_xml::escape::escape;
use reqwest::Method;
use std::{collections::BTreeMap, time::Duration};

/// Bucket to create and the canned ACL to attach to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketCreationRequest {
    pub bucket_name: String,
    pub acl: CannedAcl,
}

impl BucketCreationRequest {
    #[must_use]
    pub fn new(bucket_name: &str, acl: CannedAcl) -> Self {
        Self {
            bucket_name: bucket_name.to_string(),
            acl,
        }
    }
}

#[derive(Debug)]
pub struct CreateBucket<'a> {
    bucket: &'a str,
    acl: CannedAcl,
    timeout: Option<Duration>,
}

impl<'a> CreateBucket<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str, acl: CannedAcl) -> Self {
        Self {
            bucket,
            acl,
            timeout: None,
        }
    }

    /// Deadline for this call only, defaults to the client timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the `Location` header if the service sent one.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the bucket name is empty, the request could not be
    /// sent or the service rejected it
    pub async fn request(&self, s3: &S3) -> Result<Option<String>, StorageError> {
        // the name travels as a single path segment, everything else is up to the service
        if self.bucket.is_empty() {
            return Err(StorageError::new(
                StorageErrorKind::InvalidName,
                "bucket name is empty",
            ));
        }

        // dot segments are dropped from the url path, the request would hit the root
        if matches!(self.bucket, "." | "..") {
            return Err(StorageError::new(
                StorageErrorKind::InvalidName,
                format!("bucket name is a dot segment: {}", self.bucket),
            ));
        }

        if self.bucket.contains('/') {
            return Err(StorageError::new(
                StorageErrorKind::InvalidName,
                format!("bucket name contains '/': {}", self.bucket),
            ));
        }

        let body = location_constraint(s3.region().name());
        let digest = sha256_digest_string(body.as_deref().unwrap_or_default());
        let length = body.as_ref().map(String::len);

        let (url, headers) = self.sign(s3, &digest, length)?;

        let response = request::request(
            s3.client(),
            url,
            self.http_method(),
            &headers,
            body,
            self.timeout,
        )
        .await?;

        log::debug!("status: {}", response.status());

        if response.status().is_success() {
            let location = response
                .headers()
                .get("location")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);

            log::debug!(
                "bucket {} created, location: {}",
                self.bucket,
                location.as_deref().unwrap_or("-")
            );

            Ok(location)
        } else {
            Err(response_error(response).await)
        }
    }
}

// us-east-1 is the default location and AWS rejects it as an explicit constraint
fn location_constraint(region: &str) -> Option<String> {
    if region.is_empty() || region == "us-east-1" {
        return None;
    }

    Some(format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<CreateBucketConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
    <LocationConstraint>{}</LocationConstraint>
</CreateBucketConfiguration>"#,
        escape(region)
    ))
}

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html>
impl Action for CreateBucket<'_> {
    fn http_method(&self) -> Method {
        Method::PUT
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();

        map.insert("x-amz-acl", self.acl.as_str());

        Some(map)
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        Some(vec![self.bucket])
    }
}
