use crate::s3::{BucketCreationRequest, S3, create_bucket};
use anyhow::Result;
use colored::Colorize;

/// # Errors
/// Will return an error if the bucket could not be created, `AlreadyExists`
/// is not an error when `exist_ok` is set
pub async fn handle(s3: &S3, request: &BucketCreationRequest, exist_ok: bool) -> Result<()> {
    match create_bucket(s3, request).await {
        Ok(()) => {
            println!(
                "{} {} ({})",
                "created:".green(),
                request.bucket_name,
                request.acl
            );
            Ok(())
        }

        Err(e) if exist_ok && e.is_already_exists() => {
            log::info!("{e}");
            println!("{} {}", "exists:".yellow(), request.bucket_name);
            Ok(())
        }

        Err(e) => Err(e.into()),
    }
}
