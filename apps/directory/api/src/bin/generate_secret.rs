//! Print a random hex secret for `JWT_SECRET` or `SESSION_SECRET`.

use clap::Parser;
use color_eyre::Result;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a random hex-encoded secret")]
struct Args {
    /// Number of random bytes (the output has twice as many hex characters)
    #[arg(short, long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(16..))]
    bytes: u16,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let random_bytes: Vec<u8> = (0..args.bytes).map(|_| rand::random::<u8>()).collect();
    println!("{}", const_hex::encode(random_bytes));

    Ok(())
}
