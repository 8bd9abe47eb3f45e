//! `repstash` - store and recover covert payloads in a ledger account's
//! representative history.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::RngCore;
use tracing::info;

use repstash_core::{decode_address, encode_address, Keypair};
use repstash_rpc::{read_payloads, CovertChannel, HttpNodeClient};

#[derive(Parser)]
#[command(name = "repstash", version, about = "Covert data in representative fields")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a fresh random seed and print its account.
    Keygen,

    /// Re-derive the public key and account address from a seed.
    Inspect {
        /// 32-byte seed, hex.
        #[arg(long)]
        seed: String,
    },

    /// Encode a 32-byte hex key as an address.
    Encode {
        /// 32-byte key, hex.
        key: String,
    },

    /// Decode an address back to its 32-byte key.
    Decode {
        /// nano_ or xrb_ address.
        address: String,
    },

    /// Write a payload into the seed's account, one block per chunk.
    Put {
        /// Node RPC endpoint.
        #[arg(long, env = "REPSTASH_NODE_URL")]
        node: String,

        /// 32-byte seed, hex.
        #[arg(long, env = "REPSTASH_SEED", hide_env_values = true)]
        seed: String,

        /// Read the payload from this file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Read every payload stored in an account's history.
    Get {
        /// Node RPC endpoint.
        #[arg(long, env = "REPSTASH_NODE_URL")]
        node: String,

        /// Account address to scan.
        #[arg(long)]
        account: String,

        /// Print payloads as hex instead of raw bytes.
        #[arg(long)]
        hex: bool,
    },
}

fn parse_seed(seed_hex: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(seed_hex.trim()).context("seed is not valid hex")?;
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("seed must be exactly 32 bytes, got {}", bytes.len()))?;
    Ok(seed)
}

fn print_identity(seed: Option<&[u8; 32]>, keypair: &Keypair) {
    if let Some(seed) = seed {
        println!("seed:    {}", hex::encode(seed));
    }
    println!("public:  {}", keypair.public_key().to_hex());
    println!("account: {}", encode_address(keypair.public_key().as_bytes()));
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Keygen => {
            let mut seed = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut seed);
            let keypair = Keypair::from_seed(&seed)?;
            print_identity(Some(&seed), &keypair);
        }

        Command::Inspect { seed } => {
            let seed = parse_seed(&seed)?;
            let keypair = Keypair::from_seed(&seed)?;
            print_identity(None, &keypair);
        }

        Command::Encode { key } => {
            let bytes = hex::decode(key.trim()).context("key is not valid hex")?;
            let key: [u8; 32] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| anyhow::anyhow!("key must be exactly 32 bytes"))?;
            println!("{}", encode_address(&key));
        }

        Command::Decode { address } => {
            let key = decode_address(address.trim())?;
            println!("{}", hex::encode(key));
        }

        Command::Put { node, seed, file } => {
            let seed = parse_seed(&seed)?;
            let payload = match file {
                Some(path) => std::fs::read(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
                    buf
                }
            };
            if payload.is_empty() {
                bail!("refusing to write an empty payload");
            }

            let channel = CovertChannel::new(HttpNodeClient::new(node), &seed)?;
            info!(account = %channel.account(), bytes = payload.len(), "writing");
            let hashes = channel.write(&payload).await?;
            for hash in &hashes {
                println!("{hash}");
            }
            info!(blocks = hashes.len(), "done");
        }

        Command::Get { node, account, hex: as_hex } => {
            let client = HttpNodeClient::new(node);
            let payloads = read_payloads(&client, &account).await?;
            info!(payloads = payloads.len(), "recovered");
            let mut stdout = std::io::stdout().lock();
            for payload in payloads {
                if as_hex {
                    writeln!(stdout, "{}", hex::encode(&payload))?;
                } else {
                    stdout.write_all(&payload)?;
                }
            }
        }
    }

    Ok(())
}
