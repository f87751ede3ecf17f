use ecosystem_client::ClientError;
use ecosystem_sdk::SdkError;
use ecosystem_tx::TxError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid keypair: {0}")]
    Keypair(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    Argument(#[from] SdkError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl CliError {
    /// Process exit status for this failure.
    ///
    /// 1 usage or input, 2 retries exhausted, 3 on-ledger execution failure,
    /// 4 confirmation timeout, 5 rejected by the node, 6 deadline exceeded,
    /// 7 any other ledger failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Client(ClientError::Operation { source, .. }) => tx_exit_code(source),
            CliError::Client(ClientError::Ledger(_)) => 7,
            _ => 1,
        }
    }

    /// Whether the transaction may still land despite the failure.
    pub fn is_ambiguous(&self) -> bool {
        match self {
            CliError::Client(error) => error.tx_error().is_some_and(TxError::is_ambiguous),
            _ => false,
        }
    }
}

fn tx_exit_code(error: &TxError) -> u8 {
    match error {
        TxError::RetriesExhausted { last_error, .. } => match last_error.as_ref() {
            TxError::ConfirmationTimeout { .. } => 4,
            _ => 2,
        },
        TxError::ExecutionFailed { .. } => 3,
        TxError::ConfirmationTimeout { .. } => 4,
        TxError::Rejected { .. } => 5,
        TxError::DeadlineExceeded { .. } => 6,
        TxError::Ledger(_) => 7,
        TxError::Signing(_) | TxError::Serialization(_) | TxError::Config(_) => 1,
    }
}
