//! Configuration module for the relayer.
//!
//! Configuration is read from TOML. `${VAR}` and `${VAR:-default}` placeholders
//! are replaced with environment variables before parsing, so key material can
//! be kept out of the file itself:
//!
//! ```toml
//! [account]
//! private_key = "${RELAYER_PRIVATE_KEY}"
//!
//! [delivery]
//! rpc_url = "http://localhost:8545"
//!
//! [outcome]
//! default_budget = 21000
//! ```

use regex::Regex;
use relay_types::PrivateKey;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Keep the message only; the full error echoes the input, key included.
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the relayer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Signing account.
	pub account: AccountConfig,
	/// Receipt source. Only needed for outcome classification.
	pub delivery: Option<DeliveryConfig>,
	/// Outcome classification defaults.
	#[serde(default)]
	pub outcome: OutcomeConfig,
}

/// Configuration for the signing account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
	/// Hex-encoded secp256k1 private key, with or without `0x`.
	pub private_key: PrivateKey,
}

/// Configuration for the JSON-RPC receipt source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
	/// HTTP endpoint of the node.
	pub rpc_url: String,
	/// Delay between receipt polls in milliseconds.
	/// Defaults to 1000 milliseconds if not specified.
	#[serde(default = "default_poll_interval_ms")]
	pub poll_interval_ms: u64,
	/// How long to wait for a receipt before giving up.
	/// Defaults to 60 seconds if not specified.
	#[serde(default = "default_timeout_seconds")]
	pub timeout_seconds: u64,
}

impl DeliveryConfig {
	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms)
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_seconds)
	}
}

/// Defaults for outcome classification.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutcomeConfig {
	/// Gas limit assumed when a command does not pass one explicitly.
	pub default_budget: Option<u64>,
}

fn default_poll_interval_ms() -> u64 {
	1000
}

fn default_timeout_seconds() -> u64 {
	60
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)))
				},
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}

	result.push_str(&input[last_end..]);
	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("Cannot read {}: {}", path.display(), e),
			))
		})?;
		content.parse()
	}

	/// Validates the configuration to ensure all values are usable.
	fn validate(&self) -> Result<(), ConfigError> {
		if let Some(ref delivery) = self.delivery {
			if delivery.rpc_url.is_empty() {
				return Err(ConfigError::Validation(
					"delivery.rpc_url cannot be empty".into(),
				));
			}
			if !delivery.rpc_url.starts_with("http://") && !delivery.rpc_url.starts_with("https://")
			{
				return Err(ConfigError::Validation(format!(
					"delivery.rpc_url must be an http(s) URL, got '{}'",
					delivery.rpc_url
				)));
			}
			if delivery.poll_interval_ms == 0 {
				return Err(ConfigError::Validation(
					"delivery.poll_interval_ms must be greater than 0".into(),
				));
			}
			if delivery.timeout_seconds == 0 {
				return Err(ConfigError::Validation(
					"delivery.timeout_seconds must be greater than 0".into(),
				));
			}
			if delivery.timeout_seconds > 3600 {
				return Err(ConfigError::Validation(
					"delivery.timeout_seconds cannot exceed 3600 (1 hour)".into(),
				));
			}
		}

		if self.outcome.default_budget == Some(0) {
			return Err(ConfigError::Validation(
				"outcome.default_budget must be greater than 0".into(),
			));
		}

		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use tempfile::TempDir;

	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn minimal_config() -> String {
		format!(
			r#"
[account]
private_key = "{}"
"#,
			TEST_KEY
		)
	}

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("RELAY_TEST_HOST", "localhost");
		std::env::set_var("RELAY_TEST_PORT", "8545");

		let input = "rpc_url = \"http://${RELAY_TEST_HOST}:${RELAY_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "rpc_url = \"http://localhost:8545\"");

		std::env::remove_var("RELAY_TEST_HOST");
		std::env::remove_var("RELAY_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${RELAY_MISSING_VAR:-default_value}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"default_value\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${RELAY_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("RELAY_MISSING_VAR"));
	}

	#[test]
	fn test_oversized_input_rejected() {
		let input = "a".repeat(1024 * 1024 + 1);
		assert!(matches!(
			resolve_env_vars(&input),
			Err(ConfigError::Validation(_))
		));
	}

	#[test]
	fn test_minimal_config() {
		let config: Config = minimal_config().parse().unwrap();
		assert_eq!(config.account.private_key, TEST_KEY.parse::<PrivateKey>().unwrap());
		assert!(config.delivery.is_none());
		assert_eq!(config.outcome.default_budget, None);
	}

	#[test]
	fn test_private_key_from_env() {
		std::env::set_var("RELAY_TEST_PRIVATE_KEY", TEST_KEY);

		let config: Config = r#"
[account]
private_key = "${RELAY_TEST_PRIVATE_KEY}"
"#
		.parse()
		.unwrap();
		assert_eq!(config.account.private_key, TEST_KEY.parse::<PrivateKey>().unwrap());

		std::env::remove_var("RELAY_TEST_PRIVATE_KEY");
	}

	#[test]
	fn test_delivery_defaults() {
		let config: Config = format!(
			"{}\n[delivery]\nrpc_url = \"http://localhost:8545\"\n",
			minimal_config()
		)
		.parse()
		.unwrap();

		let delivery = config.delivery.unwrap();
		assert_eq!(delivery.poll_interval(), Duration::from_millis(1000));
		assert_eq!(delivery.timeout(), Duration::from_secs(60));
	}

	#[test]
	fn test_invalid_private_key() {
		let result = "[account]\nprivate_key = \"0x1234\"\n".parse::<Config>();
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_parse_error_does_not_echo_key() {
		let input = format!("{}\n[delivery\n", minimal_config());
		let err = input.parse::<Config>().unwrap_err();
		assert!(!err.to_string().contains("ac0974"));
	}

	#[test]
	fn test_validation_failures() {
		let cases = [
			("[delivery]\nrpc_url = \"\"\n", "rpc_url"),
			("[delivery]\nrpc_url = \"ws://localhost:8546\"\n", "http"),
			(
				"[delivery]\nrpc_url = \"http://localhost:8545\"\npoll_interval_ms = 0\n",
				"poll_interval_ms",
			),
			(
				"[delivery]\nrpc_url = \"http://localhost:8545\"\ntimeout_seconds = 7200\n",
				"timeout_seconds",
			),
			("[outcome]\ndefault_budget = 0\n", "default_budget"),
		];

		for (section, needle) in cases {
			let input = format!("{}\n{}", minimal_config(), section);
			let err = input.parse::<Config>().unwrap_err();
			assert!(
				matches!(err, ConfigError::Validation(ref msg) if msg.contains(needle)),
				"unexpected error for {}: {}",
				needle,
				err
			);
		}
	}

	#[tokio::test]
	async fn test_from_file() {
		let temp_dir = TempDir::new().unwrap();
		let config_path = temp_dir.path().join("config.toml");

		let content = format!(
			"{}\n[delivery]\nrpc_url = \"http://localhost:8545\"\ntimeout_seconds = 5\n\n[outcome]\ndefault_budget = 21000\n",
			minimal_config()
		);
		fs::write(&config_path, content).unwrap();

		let config = Config::from_file(&config_path).await.unwrap();
		assert_eq!(config.delivery.unwrap().timeout_seconds, 5);
		assert_eq!(config.outcome.default_budget, Some(21000));
	}

	#[tokio::test]
	async fn test_from_missing_file() {
		let temp_dir = TempDir::new().unwrap();
		let result = Config::from_file(temp_dir.path().join("missing.toml")).await;
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}
}
