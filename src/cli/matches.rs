use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;

/// returns the host and the bucket from `<s3 provider>/<bucket name>`
pub fn host_bucket(matches: &ArgMatches) -> Result<(&str, &str)> {
    let arguments = matches
        .get_one::<String>("arguments")
        .map(String::as_str)
        .context("arguments missing")?;

    log::debug!("arguments: {arguments}");

    let (host, bucket) = arguments
        .split_once('/')
        .context("No \"bucket\" found, try: <s3 provider>/<bucket name>")?;

    if host.is_empty() {
        return Err(anyhow!(
            "No \"host\" found, try: <s3 provider>/<bucket name>"
        ));
    }

    // allow host/bucket/
    let bucket = bucket.strip_suffix('/').unwrap_or(bucket);

    if bucket.is_empty() {
        return Err(anyhow!(
            "No \"bucket\" found, try: <s3 provider>/<bucket name>"
        ));
    }

    Ok((host, bucket))
}
