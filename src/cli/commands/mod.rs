pub mod cmd_show;

use crate::s3::CannedAcl;
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::ValueParser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn validator_is_file() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<PathBuf, String> {
        if let Ok(metadata) = fs::metadata(s) {
            if metadata.is_file() {
                return Ok(PathBuf::from(s));
            }
        }

        Err(format!("Invalid file path or file does not exist: '{s}'"))
    })
}

pub fn new(config_path: &Path) -> Command {
    // get config file path (default: ~/.config/s3cb/config.yml)
    let config_file_path = config_path.join("config.yml");

    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("s3cb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create a bucket on an S3 compatible endpoint")
        .subcommand_negates_reqs(true)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("acl")
            .help("The canned ACL to apply to the bucket")
            .long("acl")
            .short('a')
            .value_parser(CannedAcl::VALUES)
            .default_value("private")
            .num_args(1)
        )
        .arg(
            Arg::new("config")
            .default_value(config_file_path.into_os_string())
            .long("config")
            .num_args(1)
            .short('c')
            .value_parser(validator_is_file())
            .value_name("config.yml")
        )
        .arg(
            Arg::new("arguments")
            .help("<s3 provider>/<bucket name>")
            .required(true)
            .num_args(1)
        )
        .arg(
            Arg::new("timeout")
            .help("Seconds to wait for the endpoint before giving up")
            .long("timeout")
            .short('t')
            .default_value("30")
            .value_parser(clap::value_parser!(u64).range(1..))
            .num_args(1)
        )
        .arg(
            Arg::new("exist-ok")
            .help("Exit successfully if the bucket already exists")
            .long("exist-ok")
            .num_args(0)
        )
        .arg(
            Arg::new("check-name")
            .help("Reject bucket names that are not DNS compatible before sending the request")
            .long("check-name")
            .num_args(0)
        )
        .arg(
            Arg::new("verbose")
            .help("Verbosity level")
            .short('v')
            .long("verbose")
            .global(true)
            .action(ArgAction::Count)
        )
        .subcommand(cmd_show::command())
}
