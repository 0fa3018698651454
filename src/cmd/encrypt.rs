use cipherbreak::cipher::CipherKey;
use cipherbreak::error::CbResult;
use clap::Args;
use std::fs::{self, File};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    #[arg(short, long, default_value = "plaintext.txt")]
    pub input: String,

    #[arg(short, long, default_value = "ciphertext.txt")]
    pub output: String,

    #[arg(long, default_value = "cipher_mapping.json")]
    pub key_out: String,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

pub fn run(args: EncryptArgs) -> CbResult<()> {
    let plaintext = fs::read_to_string(&args.input)?;

    let mut rng = if let Some(s) = args.seed {
        fastrand::Rng::with_seed(s)
    } else {
        fastrand::Rng::new()
    };

    let key = CipherKey::random(&mut rng);
    let ciphertext = key.encrypt(&plaintext);

    serde_json::to_writer_pretty(File::create(&args.key_out)?, &key)?;
    fs::write(&args.output, &ciphertext)?;

    info!("Cipher key saved to {}", args.key_out);
    info!(
        "Ciphertext ({} chars) saved to {}",
        ciphertext.chars().count(),
        args.output
    );
    Ok(())
}
