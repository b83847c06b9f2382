use anyhow::Result;
use clap::Parser;
use health_reporter::cli;
use tracing::error;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    if let Err(err) = cli::dispatch(args) {
        // Config errors happen before the subscriber exists.
        if tracing::dispatcher::has_been_set() {
            error!("{:#}", err);
        } else {
            eprintln!("{}", cli::fatal_message(&err));
        }
        std::process::exit(1);
    }
    Ok(())
}
