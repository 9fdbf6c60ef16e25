use std::time::Duration;

pub const DEFAULT_GAS_LIMIT: u64 = 4_000_000;
pub const DEFAULT_LABEL_PREFIX: &str = "secret business card demo";

/// Where and how to reach the network through `secretcli` and the LCD endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainNetworkConfig {
    pub chain_id: String,
    pub lcd_url: String,
    pub rpc_url: String,
    /// path or name of the `secretcli` executable
    pub secretcli: String,
    pub key_name: String,
    pub keyring_backend: String,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

/// Per-transaction settings used by the workflow steps.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowConfig {
    pub gas_limit: u64,
    pub label_prefix: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
            label_prefix: DEFAULT_LABEL_PREFIX.to_owned(),
        }
    }
}
