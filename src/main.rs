use clap::{Parser, Subcommand};
use std::process;
use tracing::error;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recover a substitution key from ciphertext with the genetic search
    Crack(cmd::crack::CrackArgs),
    /// Generate a random key and encrypt a plaintext file with it
    Encrypt(cmd::encrypt::EncryptArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Crack(args) => cmd::crack::run(args, cli.debug),
        Commands::Encrypt(args) => cmd::encrypt::run(args),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
