use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the workflow steps.
///
/// Anything the chain client rejects is carried through untouched in `Chain`.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Chain(#[from] anyhow::Error),

    #[error("no `{key}` entry under a `{event_type}` event in the transaction log")]
    MissingLogEntry { event_type: String, key: String },

    #[error("code id `{value}` is not an integer")]
    InvalidCodeId { value: String },

    #[error("could not read contract bytecode at {}: {source}", path.display())]
    Bytecode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("message serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("invalid mnemonic: {0}")]
    Mnemonic(#[from] ethers::signers::WalletError),

    #[error("could not encode wallet address: {0}")]
    Address(#[from] bech32::Error),
}
