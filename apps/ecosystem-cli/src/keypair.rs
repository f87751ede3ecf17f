use crate::error::{CliError, CliResult};
use serde::Deserialize;
use solana_sdk::signature::Keypair;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Accepted JSON keypair layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeypairFile {
    RawArray(Vec<u8>),
    WrappedPrivateKey {
        #[serde(rename = "privateKey")]
        private_key: Vec<u8>,
    },
    WrappedSecretKey {
        #[serde(rename = "secretKey")]
        secret_key: Vec<u8>,
    },
}

impl KeypairFile {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            KeypairFile::RawArray(bytes)
            | KeypairFile::WrappedPrivateKey { private_key: bytes }
            | KeypairFile::WrappedSecretKey { secret_key: bytes } => bytes,
        }
    }
}

#[derive(Debug, Deserialize)]
struct YamlKeypairFile {
    keypair: YamlKeypair,
}

/// The `keypair` field is usually a JSON array written as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YamlKeypair {
    Json(String),
    Bytes(Vec<u8>),
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

pub fn load_keypair(path: &Path) -> CliResult<Keypair> {
    let path = expand_home(path);
    debug!(path = %path.display(), "Loading keypair");

    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let bytes = match extension {
        "json" => serde_json::from_str::<KeypairFile>(&fs::read_to_string(&path)?)
            .map_err(|e| CliError::Keypair(format!("unrecognized keypair file format: {}", e)))?
            .into_bytes(),
        "yaml" | "yml" => {
            let file: YamlKeypairFile = serde_yaml::from_str(&fs::read_to_string(&path)?)?;
            match file.keypair {
                YamlKeypair::Json(raw) => serde_json::from_str(&raw)?,
                YamlKeypair::Bytes(bytes) => bytes,
            }
        }
        _ => {
            return Err(CliError::Keypair(format!(
                "unsupported keypair format for {}, use .json or .yaml/.yml",
                path.display()
            )))
        }
    };

    Keypair::from_bytes(&bytes).map_err(|e| CliError::Keypair(e.to_string()))
}
