//! CLI entry point for building photo collages and photomosaics

use clap::Parser;
use collage::io::cli::{Cli, CollageRunner, init_logging};

fn main() -> collage::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.run_options());
    let mut runner = CollageRunner::new(cli);
    runner.run()
}
