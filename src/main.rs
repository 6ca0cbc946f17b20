use clap::Parser;
use psk_link::cli::{init_logging, Args, Run};
use std::error::Error;

#[termination::display]
fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    Args::parse().run()
}
