mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Parse CLI and dispatch (logging init needs the parsed --verbose flag).
    if let Err(err) = Cli::run_from_args().await {
        eprintln!("wkdcheck error: {:#}", err);
        std::process::exit(1);
    }
}
