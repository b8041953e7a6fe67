use crate::cli::{Config, actions::Action, commands, dispatch::dispatch};
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// ~/.config/s3cb, created if missing
///
/// # Errors
/// Will return an error if the directory can't be created
pub fn get_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().map_or_else(|| PathBuf::from("/tmp"), |h| h);

    let config_path = Path::new(&home_dir).join(".config").join("s3cb");
    fs::create_dir_all(&config_path)
        .with_context(|| format!("unable to create: {}", config_path.display()))?;

    Ok(config_path)
}

const fn verbosity(level: u8) -> log::LevelFilter {
    match level {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

/// # Errors
/// Will return an error if the config file is not found or the arguments are invalid
pub fn start() -> Result<Action> {
    let config_path = get_config_path()?;

    // start the command line interface
    let matches = commands::new(&config_path).get_matches();

    env_logger::Builder::new()
        .filter_level(verbosity(
            matches.get_one::<u8>("verbose").copied().unwrap_or(0),
        ))
        .init();

    log::info!("config path: {}", config_path.display());

    action(&matches)
}

/// Load the config file given by `--config` and build the action to run
///
/// # Errors
/// Will return an error if the config file can't be loaded or the action can't be built
pub fn action(matches: &ArgMatches) -> Result<Action> {
    let config_file = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .context("no config file found")?;

    let config = Config::new(config_file)?;

    log::debug!("config: {config:#?}");

    dispatch(matches, &config)
}
