use crate::s3::{BucketCreationRequest, S3};
use anyhow::Result;

pub mod bucket;

#[derive(Debug)]
pub enum Action {
    CreateBucket {
        s3: S3,
        request: BucketCreationRequest,
        exist_ok: bool,
    },
    ShowHosts {
        hosts: Vec<String>,
    },
}

/// # Errors
/// Will return an error if the action fails
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::CreateBucket {
            s3,
            request,
            exist_ok,
        } => bucket::handle(&s3, &request, exist_ok).await,

        Action::ShowHosts { hosts } => {
            println!("Hosts:");
            for host in hosts {
                println!("   - {host}");
            }
            Ok(())
        }
    }
}
