//! Main entry point for the relayer CLI.
//!
//! This binary signs relay authorizations and plain messages with the
//! configured key, recovers signers from relay signatures, and classifies the
//! outcome of submitted operations from their receipts.

use clap::{Parser, Subcommand};
use relay_account::AccountService;
use relay_config::Config;
use relay_delivery::implementations::evm::alloy::AlloyDelivery;
use relay_delivery::DeliveryService;
use relay_types::ExecutionBudget;
use std::path::{Path, PathBuf};

mod commands;

use commands::CommandError;

/// Command-line arguments for the relayer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the address of the configured signer
	Address,
	/// Authorize a relayer to submit a payload at a nonce
	SignRelay {
		/// Nonce, decimal or 0x-prefixed hex
		#[arg(long)]
		nonce: String,
		/// Payload as hex
		#[arg(long, default_value = "")]
		payload: String,
	},
	/// Sign the keccak256 hash of a payload
	SignMessage {
		/// Payload as hex
		#[arg(long)]
		payload: String,
	},
	/// Recover the signer of a relay authorization
	RecoverRelay {
		/// Nonce, decimal or 0x-prefixed hex
		#[arg(long)]
		nonce: String,
		/// Payload as hex
		#[arg(long, default_value = "")]
		payload: String,
		/// 65-byte signature as hex
		#[arg(long)]
		signature: String,
	},
	/// Classify a submitted transaction from its receipt
	Classify {
		/// Transaction hash as hex
		#[arg(long)]
		tx_hash: String,
		/// Gas limit the transaction was sent with
		#[arg(long)]
		budget: Option<u64>,
		/// Poll until the receipt is available
		#[arg(long)]
		wait: bool,
	},
}

/// Main entry point for the relayer.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration when the command needs it
/// 4. Runs the command and prints its output as JSON
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let default_directive = args.log_level.to_string();
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	// Logs go to stderr so stdout stays machine-readable.
	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	let output = match args.command {
		Command::Address => {
			let account = build_account(&load_config(&args.config).await?);
			serde_json::to_value(commands::address(&account)?)?
		},
		Command::SignRelay { nonce, payload } => {
			let account = build_account(&load_config(&args.config).await?);
			let nonce = commands::parse_nonce(&nonce)?;
			let payload = commands::parse_hex(&payload)?;
			serde_json::to_value(commands::sign_relay(&account, nonce, &payload)?)?
		},
		Command::SignMessage { payload } => {
			let account = build_account(&load_config(&args.config).await?);
			let payload = commands::parse_hex(&payload)?;
			serde_json::to_value(commands::sign_message(&account, &payload)?)?
		},
		Command::RecoverRelay {
			nonce,
			payload,
			signature,
		} => {
			let nonce = commands::parse_nonce(&nonce)?;
			let payload = commands::parse_hex(&payload)?;
			serde_json::to_value(commands::recover_relay(nonce, &payload, &signature)?)?
		},
		Command::Classify {
			tx_hash,
			budget,
			wait,
		} => {
			let config = load_config(&args.config).await?;
			let budget = budget
				.or(config.outcome.default_budget)
				.map(ExecutionBudget)
				.ok_or_else(|| {
					CommandError::InvalidArgument(
						"no --budget given and outcome.default_budget is not configured".into(),
					)
				})?;
			let delivery = build_delivery(&config)?;
			serde_json::to_value(commands::classify(&delivery, &tx_hash, budget, wait).await?)?
		},
	};

	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}

async fn load_config(path: &Path) -> Result<Config, CommandError> {
	let config = Config::from_file(path).await?;
	tracing::info!("Loaded configuration [{}]", path.display());
	Ok(config)
}

fn build_account(config: &Config) -> AccountService {
	AccountService::new(Box::new(config.account.private_key.clone()))
}

fn build_delivery(config: &Config) -> Result<DeliveryService, CommandError> {
	let delivery = config.delivery.as_ref().ok_or_else(|| {
		CommandError::InvalidArgument("classify requires a [delivery] section".into())
	})?;

	let provider = AlloyDelivery::new(&delivery.rpc_url)?;
	Ok(DeliveryService::new(
		Box::new(provider),
		delivery.poll_interval(),
		delivery.timeout(),
	))
}
