use crate::{
    cli::{Config, actions::Action, matches},
    s3::{BucketCreationRequest, CannedAcl, StorageError, StorageErrorKind, create_client, tools},
};
use anyhow::{Result, anyhow};
use clap::ArgMatches;
use std::time::Duration;

// return Action based on the command or subcommand
pub fn dispatch(matches: &ArgMatches, config: &Config) -> Result<Action> {
    if matches.subcommand_matches("show").is_some() {
        return Ok(Action::ShowHosts {
            hosts: config.hosts.keys().cloned().collect(),
        });
    }

    let (host, bucket) = matches::host_bucket(matches)?;

    if matches.get_flag("check-name") && !tools::valid_bucket_name(bucket) {
        return Err(StorageError::new(
            StorageErrorKind::InvalidName,
            format!("{bucket} is not a DNS compatible bucket name"),
        )
        .into());
    }

    let acl = matches
        .get_one::<String>("acl")
        .map_or_else(|| Ok(CannedAcl::default()), |acl| acl.parse::<CannedAcl>())
        .map_err(|e| anyhow!(e))?;

    let timeout = Duration::from_secs(matches.get_one::<u64>("timeout").copied().unwrap_or(30));

    let host = config.get_host(host)?;

    log::debug!("host: {host:#?}");

    let s3 = create_client(host.endpoint_configuration(timeout))?;

    log::info!("{s3}");

    Ok(Action::CreateBucket {
        s3,
        request: BucketCreationRequest::new(bucket, acl),
        exist_ok: matches.get_flag("exist-ok"),
    })
}
