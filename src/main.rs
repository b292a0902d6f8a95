#![allow(clippy::exit)]
#![allow(clippy::print_stderr)]

use clap::Parser;

use linrec::cli::{self, Args};

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(err) = cli::main(&args) {
        log::error!("{:?}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
