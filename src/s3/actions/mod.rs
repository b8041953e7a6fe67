//! Actions
//! <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>

use crate::s3::{
    S3,
    error::{StorageError, StorageErrorKind},
    responses::ErrorResponse,
    signature::Signature,
};
use quick_xml::de::from_str;
use reqwest::{Method, Response};
use std::collections::BTreeMap;
use url::Url;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html>
mod createbucket;
pub use self::createbucket::{BucketCreationRequest, CreateBucket};

pub trait Action {
    // headers to send in the request
    fn headers(&self) -> Option<BTreeMap<&str, &str>>;

    // method to use GET/PUT...
    fn http_method(&self) -> Method;

    // URL query pairs
    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>>;

    // URL path
    fn path(&self) -> Option<Vec<&str>>;

    /// # Errors
    ///
    /// Will return `Err` if the endpoint can not be used as a base url
    fn sign(
        &self,
        s3: &S3,
        hash_payload: &str,
        content_length: Option<usize>,
    ) -> Result<(Url, BTreeMap<String, String>), StorageError> {
        let mut url = s3.endpoint().clone();

        if let Some(path) = self.path() {
            url.path_segments_mut()
                .map_err(|()| {
                    StorageError::new(
                        StorageErrorKind::Unknown,
                        format!("cannot be a base url: {}", s3.endpoint()),
                    )
                })?
                .pop_if_empty()
                .extend(path);
        }

        if let Some(pairs) = &self.query_pairs() {
            for (k, v) in pairs {
                url.query_pairs_mut().append_pair(k, v);
            }
        }

        let headers = Signature::new(s3, self.http_method(), &url).sign(
            hash_payload,
            content_length,
            self.headers(),
        );

        log::debug!(
            "signed headers: {}",
            headers.keys().map(String::as_str).collect::<Vec<_>>().join(";")
        );

        Ok((url, headers))
    }
}

/// Turn a non-successful response into a typed error, the S3 error code wins over the status.
pub async fn response_error(response: Response) -> StorageError {
    let status = response.status();

    let mut error: BTreeMap<&str, String> = BTreeMap::new();
    error.insert("HTTP Status Code", status.to_string());

    if let Some(rid) = response
        .headers()
        .get("x-amz-request-id")
        .and_then(|v| v.to_str().ok())
    {
        error.insert("Request ID", rid.to_string());
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("unable to read error body: {e}");
            String::new()
        }
    };

    let kind = match from_str::<ErrorResponse>(&body) {
        Ok(e) => {
            let kind = StorageErrorKind::from_code(&e.code);
            error.insert("Code", e.code);
            if let Some(message) = e.message {
                error.insert("Message", message);
            }
            if let Some(resource) = e.resource {
                error.insert("Resource", resource);
            }
            // the header wins, some servers only send it in the body
            if let Some(rid) = e.request_id {
                error.entry("Request ID").or_insert(rid);
            }
            kind
        }
        Err(_) => {
            if !body.trim().is_empty() {
                error.insert("Response", body);
            }
            None
        }
    }
    .unwrap_or_else(|| StorageErrorKind::from_status(status.as_u16()));

    StorageError::new(
        kind,
        error
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<String>>()
            .join(", "),
    )
}
