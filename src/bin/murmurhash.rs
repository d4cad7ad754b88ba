use murmur::cli::{self, Args};

use clap::Parser;

fn main() -> std::io::Result<()> {
    cli::init_tracing();
    let args = Args::parse();
    cli::run(&args, &mut std::io::stdout().lock())
}
