//! votelink: inspect and build voting key link transaction payloads.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;

use votelink_transactions::dto::TransactionEnvelopeDto;
use votelink_transactions::validation::validate_transaction;
use votelink_transactions::{
    Parsed, PublicAccount, Transaction, TransactionConfig, TransactionFactory, TransactionModel,
};
use votelink_types::{Address, LinkAction, NetworkType, PublicKey, VotingKey};

#[derive(Parser)]
#[command(name = "votelink", about = "Voting key link transaction tool")]
struct Cli {
    /// Network to build for: "mainnet", "testnet", "private", "privatetest",
    /// "mijin" or "mijintest". Overrides the config file.
    #[arg(long, global = true, env = "VOTELINK_NETWORK")]
    network: Option<NetworkType>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, default_value = "warn", env = "VOTELINK_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Decode a hex payload and print it as REST JSON.
    Decode {
        payload: String,
        /// Payload is in the embedded (aggregate inner) form.
        #[arg(long)]
        embedded: bool,
    },

    /// Build an unsigned voting key link payload.
    Link {
        /// 48-byte voting public key, hex.
        #[arg(long)]
        key: VotingKey,
        #[arg(long)]
        start: u32,
        #[arg(long)]
        end: u32,
        /// Unlink instead of link.
        #[arg(long)]
        unlink: bool,
        /// Max fee, overriding the config file.
        #[arg(long)]
        fee: Option<u64>,
        /// Emit the embedded form. Requires --signer.
        #[arg(long, requires = "signer")]
        embedded: bool,
        /// Signer public key, hex.
        #[arg(long)]
        signer: Option<PublicKey>,
    },

    /// Check whether an account should be notified about a payload.
    Notify {
        payload: String,
        address: String,
        #[arg(long)]
        embedded: bool,
    },

    /// Derive the address of a public key on the selected network.
    Address { public_key: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    votelink_utils::init_tracing_with(&cli.log_level, cli.log_json);

    let file_config = cli.config.as_ref().and_then(|path| {
        match TransactionConfig::from_toml_file(path) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                tracing::warn!("{e}, using defaults");
                None
            }
        }
    });

    let mut config = file_config.unwrap_or_default();
    if let Some(network) = cli.network {
        config.network_type = network;
    }

    match cli.command {
        Command::Decode { payload, embedded } => decode(&config, &payload, embedded),
        Command::Link {
            key,
            start,
            end,
            unlink,
            fee,
            embedded,
            signer,
        } => {
            if let Some(fee) = fee {
                config.max_fee = fee;
            }
            let action = if unlink {
                LinkAction::Unlink
            } else {
                LinkAction::Link
            };
            link(config, key, start, end, action, embedded, signer)
        }
        Command::Notify {
            payload,
            address,
            embedded,
        } => notify(&payload, &address, embedded),
        Command::Address { public_key } => {
            let key = hex::decode(public_key.trim()).context("public key is not valid hex")?;
            let address = votelink_crypto::derive_address(&key, config.network_type);
            println!("{}", address.pretty());
            Ok(())
        }
    }
}

fn decode(config: &TransactionConfig, payload: &str, embedded: bool) -> anyhow::Result<()> {
    let parsed = Transaction::from_payload(payload, embedded).context("failed to decode payload")?;

    if let Parsed::Standalone(tx) = &parsed {
        if tx.network_type() != config.network_type {
            tracing::warn!(
                "payload is for {}, configured network is {}",
                tx.network_type(),
                config.network_type
            );
        }
        let now = TransactionFactory::new(config.clone()).network_time();
        match validate_transaction(tx, now) {
            Ok(()) => tracing::info!(
                "deadline in {}",
                votelink_utils::format_duration(tx.deadline().remaining_millis(now) / 1000)
            ),
            Err(e) => tracing::warn!("transaction would be rejected: {e}"),
        }
    }

    let tx = parsed.into_transaction();
    println!("{}", TransactionEnvelopeDto::from_transaction(&tx).to_json()?);
    Ok(())
}

fn link(
    config: TransactionConfig,
    key: VotingKey,
    start: u32,
    end: u32,
    action: LinkAction,
    embedded: bool,
    signer: Option<PublicKey>,
) -> anyhow::Result<()> {
    let network = config.network_type;
    let factory = TransactionFactory::new(config);
    let tx = factory.voting_key_link(key, start, end, action)?;

    if let Err(e) = validate_transaction(&Transaction::from(tx.clone()), factory.network_time()) {
        tracing::warn!("built transaction would be rejected: {e}");
    }

    let signer = signer.map(|key| PublicAccount::new(key, network));
    let payload = match (embedded, signer) {
        (true, Some(signer)) => tx.to_aggregate(signer).to_payload(),
        (true, None) => bail!("--embedded requires --signer"),
        (false, signer) => {
            let header = tx.header().clone().with_signer(signer);
            tx.with_header(header).to_payload()
        }
    };
    println!("{payload}");
    Ok(())
}

fn notify(payload: &str, address: &str, embedded: bool) -> anyhow::Result<()> {
    let address = Address::new(address);
    if !votelink_crypto::validate_address(address.as_str()) {
        bail!("invalid address: {address}");
    }
    let tx = Transaction::from_payload(payload, embedded)
        .context("failed to decode payload")?
        .into_transaction();
    let notify = tx.should_notify_account(&address);
    tracing::debug!(%address, notify, "notification check");
    println!("{notify}");
    Ok(())
}
