use colored::Colorize;
use s3cb::cli::{actions, exit_code, start};
use std::process;

#[tokio::main]
async fn main() {
    let result = match start() {
        Ok(action) => actions::handle(action).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", "Error:".red());
        process::exit(exit_code(&e));
    }
}
