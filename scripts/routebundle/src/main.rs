use std::path::PathBuf;

use clap::Parser;
use routebundle::{route_file, Mode};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Route a bundle of Manhattan paths between two port sets described in a TOML job file"
)]
pub struct Args {
    /// The output JSON file. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Overrides the routing mode given in the job file.
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,
    /// The input TOML job file.
    input: PathBuf,
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(err) = route_file(&args.input, args.output.as_deref(), args.mode) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
