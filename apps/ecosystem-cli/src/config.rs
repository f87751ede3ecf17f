use crate::error::{CliError, CliResult};
use clap::Args;
use ecosystem_sdk::DEFAULT_COMPUTE_UNITS;
use ecosystem_tx::{Commitment, SubmitConfig};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_KEYPAIR_PATH: &str = "~/.config/solana/id.json";

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Payer keypair file (.json, .yaml or .yml)
    #[arg(long, global = true, env = "ECOSYSTEM_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Solana RPC URL
    #[arg(long, global = true, env = "ECOSYSTEM_RPC_URL")]
    pub url: Option<String>,

    /// YAML file with defaults for the options below
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Broadcast attempts before giving up
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Shorter backoff and fewer confirmation attempts
    #[arg(long, global = true)]
    pub fast: bool,

    /// Bound on total time spent submitting one transaction
    #[arg(long, global = true)]
    pub deadline_secs: Option<u64>,

    /// Compute unit limit for create-ecosystem and deposit
    #[arg(long, global = true)]
    pub compute_units: Option<u32>,

    /// processed, confirmed or finalized
    #[arg(long, global = true)]
    pub commitment: Option<Commitment>,
}

/// Config file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub rpc_url: Option<String>,
    pub keypair: Option<PathBuf>,
    pub commitment: Option<String>,
    pub max_retries: Option<u32>,
    pub fast: Option<bool>,
    pub compute_units: Option<u32>,
    pub deadline_secs: Option<u64>,
}

impl CliConfig {
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Effective settings once flags, environment and config file are merged.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rpc_url: String,
    pub keypair_path: PathBuf,
    pub commitment: Commitment,
    pub compute_units: u32,
    pub submit_config: SubmitConfig,
}

impl Settings {
    /// Flags win over the file, the file over built-in defaults.
    pub fn resolve(args: &GlobalArgs, file: CliConfig) -> CliResult<Self> {
        let commitment = match (args.commitment, file.commitment) {
            (Some(commitment), _) => commitment,
            (None, Some(raw)) => raw.parse().map_err(CliError::InvalidConfig)?,
            (None, None) => Commitment::default(),
        };

        let fast = args.fast || file.fast.unwrap_or(false);
        let mut submit_config = if fast {
            SubmitConfig::fast()
        } else {
            SubmitConfig::standard()
        }
        .with_commitment(commitment);

        if let Some(max_retries) = args.max_retries.or(file.max_retries) {
            submit_config = submit_config.with_max_retries(max_retries);
        }
        if let Some(secs) = args.deadline_secs.or(file.deadline_secs) {
            submit_config = submit_config.with_deadline(Duration::from_secs(secs));
        }
        submit_config
            .validate()
            .map_err(|e| CliError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            rpc_url: args
                .url
                .clone()
                .or(file.rpc_url)
                .unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            keypair_path: args
                .keypair
                .clone()
                .or(file.keypair)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYPAIR_PATH)),
            commitment,
            compute_units: args
                .compute_units
                .or(file.compute_units)
                .unwrap_or(DEFAULT_COMPUTE_UNITS),
            submit_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosystem_tx::BackoffPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&GlobalArgs::default(), CliConfig::default()).unwrap();

        assert_eq!(settings.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(settings.keypair_path, PathBuf::from(DEFAULT_KEYPAIR_PATH));
        assert_eq!(settings.commitment, Commitment::Confirmed);
        assert_eq!(settings.compute_units, 400_000);
        assert_eq!(settings.submit_config.max_retries, 5);
        assert_eq!(settings.submit_config.deadline, None);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "rpc_url: http://localhost:8899\ncommitment: finalized\nmax_retries: 7\nfast: true\ndeadline_secs: 90"
        )
        .unwrap();
        let config = CliConfig::load(file.path()).unwrap();

        let args = GlobalArgs {
            url: Some("http://127.0.0.1:8899".to_string()),
            max_retries: Some(2),
            ..GlobalArgs::default()
        };
        let settings = Settings::resolve(&args, config).unwrap();

        assert_eq!(settings.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(settings.commitment, Commitment::Finalized);
        assert_eq!(settings.submit_config.max_retries, 2);
        assert_eq!(settings.submit_config.backoff, BackoffPolicy::FAST);
        assert_eq!(settings.submit_config.confirmation.commitment, Commitment::Finalized);
        assert_eq!(settings.submit_config.deadline, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = CliConfig {
            commitment: Some("eventually".to_string()),
            ..CliConfig::default()
        };
        assert!(matches!(
            Settings::resolve(&GlobalArgs::default(), config),
            Err(CliError::InvalidConfig(_))
        ));

        let args = GlobalArgs {
            max_retries: Some(0),
            ..GlobalArgs::default()
        };
        assert!(matches!(
            Settings::resolve(&args, CliConfig::default()),
            Err(CliError::InvalidConfig(_))
        ));
    }
}
