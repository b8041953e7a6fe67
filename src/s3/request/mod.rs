use crate::s3::error::{StorageError, StorageErrorKind};
use reqwest::{
    Client, Method, Response,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::{collections::BTreeMap, time::Duration};
use url::Url;

/// Send a signed request, `timeout` overrides the client timeout for this request only.
///
/// # Errors
///
/// Will return `Err` if the headers are invalid or the request could not be sent
pub async fn request(
    client: &Client,
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
    body: Option<String>,
    timeout: Option<Duration>,
) -> Result<Response, StorageError> {
    let headers = headers
        .iter()
        .map(|(k, v)| {
            Ok((
                k.parse::<HeaderName>()
                    .map_err(|e| StorageError::new(StorageErrorKind::Unknown, e.to_string()))?,
                v.parse::<HeaderValue>()
                    .map_err(|e| StorageError::new(StorageErrorKind::Unknown, e.to_string()))?,
            ))
        })
        .collect::<Result<HeaderMap, StorageError>>()?;

    log::debug!("{method} {url}");

    let mut request = client.request(method, url).headers(headers);

    if let Some(body) = body {
        request = request.body(body);
    }

    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    Ok(request.send().await?)
}
