use crate::s3::EndpointConfiguration;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, env, fmt, fs::File, path::PathBuf, time::Duration};

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct Config {
    pub hosts: BTreeMap<String, Host>,
}

#[derive(Deserialize, Eq, PartialEq)]
pub struct Host {
    pub endpoint: Option<String>,
    pub region: Option<String>,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
}

impl Config {
    /// # Errors
    /// Will return an error if the file can't be read or parsed
    pub fn new(config_path: PathBuf) -> Result<Self> {
        let file = File::open(&config_path)
            .with_context(|| format!("unable to open: {}", config_path.display()))?;

        let config: Self =
            serde_yaml_ng::from_reader(file).context("unable to parse config file")?;

        Ok(config)
    }

    /// Get the host from the config.yml
    ///
    /// # Errors
    /// Will return an error if the host is not defined
    pub fn get_host(&self, name: &str) -> Result<&Host> {
        self.hosts
            .get(name)
            .with_context(|| format!("could not find host {name}"))
    }
}

impl Host {
    /// Region from the file, then `AWS_REGION`, `AWS_DEFAULT_REGION`, defaults to us-east-1
    #[must_use]
    pub fn get_region(&self) -> String {
        self.region
            .clone()
            .filter(|r| !r.is_empty())
            .or_else(|| env::var("AWS_REGION").ok())
            .or_else(|| env::var("AWS_DEFAULT_REGION").ok())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Keys from the file, empty ones are taken from `AWS_ACCESS_KEY_ID` and
    /// `AWS_SECRET_ACCESS_KEY`
    #[must_use]
    pub fn endpoint_configuration(&self, timeout: Duration) -> EndpointConfiguration {
        let or_env = |value: &str, var: &str| {
            if value.is_empty() {
                env::var(var).unwrap_or_default()
            } else {
                value.to_string()
            }
        };

        let mut config = EndpointConfiguration::new(
            &self.get_region(),
            &or_env(&self.access_key, "AWS_ACCESS_KEY_ID"),
            &or_env(&self.secret_key, "AWS_SECRET_ACCESS_KEY"),
        )
        .with_timeout(timeout);

        if let Some(endpoint) = self.endpoint.as_deref().filter(|e| !e.is_empty()) {
            config = config.with_endpoint(endpoint);
        }

        config
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"********")
            .finish()
    }
}
