//! fairroll: sign round seeds, derive verifiable draws, audit rounds and
//! settle token payouts.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use fairroll_ledger::LedgerConfig;
use fairroll_types::{Address, H256, NetworkId, RangeSpec, Seed, Signature, TokenAmount, TypedValue};
use fairroll_utils::LogFormat;

#[derive(Parser)]
#[command(name = "fairroll", version, about = "Fairness-verifiable random draws and settlement")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, global = true, env = "FAIRROLL_CONFIG")]
    config: Option<PathBuf>,

    /// Network: "mainnet", "ropsten" or "sdk".
    #[arg(long, global = true, env = "FAIRROLL_NETWORK")]
    network: Option<NetworkId>,

    /// JSON-RPC endpoint (defaults to the network's).
    #[arg(long, global = true, env = "FAIRROLL_RPC_URL")]
    rpc_url: Option<String>,

    /// ERC20 token contract used for bets and payouts.
    #[arg(long, global = true, env = "FAIRROLL_ERC20_ADDRESS")]
    token: Option<Address>,

    /// Confirmations to wait for after each transaction.
    #[arg(long, global = true, env = "FAIRROLL_CONFIRMATIONS")]
    confirmations: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "FAIRROLL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "FAIRROLL_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a fresh round seed.
    Seed,

    /// Print 16 random bytes as 32 hex characters.
    RandomHash,

    /// Generate a new private key and print it with its address.
    Keygen,

    /// Keccak-256 over the packed encoding of `kind:value` arguments,
    /// e.g. `uint:234 bytes32:0x..`.
    Hash {
        #[arg(required = true)]
        values: Vec<TypedValue>,
    },

    /// Sign a 32-byte digest.
    Sign {
        #[arg(long, env = "FAIRROLL_PRIVATE_KEY", hide_env_values = true)]
        key: String,
        digest: H256,
    },

    /// Recover the address that signed a digest.
    Recover { digest: H256, signature: Signature },

    /// Derive one draw per `lo:hi` range from a 32-byte source or a
    /// 65-byte signature.
    Draw {
        #[arg(long)]
        signature: String,
        #[arg(required = true)]
        ranges: Vec<RangeSpec>,
    },

    /// Sign a seed and draw; prints the round record as JSON.
    Play {
        #[arg(long, env = "FAIRROLL_PRIVATE_KEY", hide_env_values = true)]
        key: String,
        /// Seed to sign (fresh if omitted).
        #[arg(long)]
        seed: Option<Seed>,
        #[arg(required = true)]
        ranges: Vec<RangeSpec>,
    },

    /// Check a round record (JSON file, or `-` for stdin).
    Audit {
        record: PathBuf,
        #[arg(long)]
        signer: Address,
    },

    /// Show native and token balances.
    Balance { address: Address },

    /// Make sure `spender` may move at least `amount` tokens of `from`.
    Approve {
        #[arg(long)]
        from: Address,
        #[arg(long)]
        spender: Address,
        #[arg(long, value_parser = TokenAmount::parse_tokens)]
        amount: TokenAmount,
    },

    /// Transfer tokens and wait for confirmations.
    Payout {
        #[arg(long)]
        from: Address,
        #[arg(long)]
        to: Address,
        #[arg(long, value_parser = TokenAmount::parse_tokens)]
        amount: TokenAmount,
    },

    /// Print the effective configuration as TOML.
    Config,
}

/// The file config (or defaults) with CLI/env overrides applied.
fn effective_config(cli: &Cli) -> anyhow::Result<LedgerConfig> {
    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(url) = &cli.rpc_url {
        config.http_provider_url = Some(url.clone());
    }
    if let Some(token) = cli.token {
        config.erc20_address = Some(token);
    }
    if let Some(n) = cli.confirmations {
        config.confirmations = n;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = effective_config(&cli)?;
    fairroll_utils::init_logging(config.log_format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let output = match cli.command {
        Command::Seed => commands::seed()?,
        Command::RandomHash => commands::random_hash()?,
        Command::Keygen => commands::keygen()?,
        Command::Hash { values } => commands::hash(&values)?,
        Command::Sign { key, digest } => commands::sign(&key, &digest)?,
        Command::Recover { digest, signature } => commands::recover(&digest, &signature)?,
        Command::Draw { signature, ranges } => commands::draw(&signature, &ranges)?,
        Command::Play { key, seed, ranges } => commands::play(&key, seed, &ranges)?,
        Command::Audit { record, signer } => commands::audit(&record, &signer)?,
        Command::Balance { address } => commands::balance(&config, &address).await?,
        Command::Approve {
            from,
            spender,
            amount,
        } => commands::approve(&config, &from, &spender, &amount).await?,
        Command::Payout { from, to, amount } => {
            commands::payout(&config, &from, &to, &amount).await?
        }
        Command::Config => config.to_toml_string()?,
    };
    println!("{output}");
    Ok(())
}
