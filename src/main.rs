//! Crisol CLI — simulation dependency resolution and containerization.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "crisol",
    version,
    about = "Resolve simulation dependency addresses and emit container recipes"
)]
struct Cli {
    #[command(subcommand)]
    command: crisol::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = crisol::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}
