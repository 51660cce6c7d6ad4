// src/bin/cli.rs
use pl_pipeline::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}
