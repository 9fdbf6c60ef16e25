use std::{error::Error, time::Duration};

use secret_business_card::config::{
    ChainNetworkConfig, WorkflowConfig, DEFAULT_GAS_LIMIT, DEFAULT_LABEL_PREFIX,
};
use tracing::{info, warn};

const CHAIN_ID_ENV_VAR: &str = "CHAIN_ID";
const LCD_URL_ENV_VAR: &str = "LCD_URL";
const RPC_URL_ENV_VAR: &str = "RPC_URL";
const SECRETCLI_ENV_VAR: &str = "SECRETCLI";
const KEY_NAME_ENV_VAR: &str = "KEY_NAME";
const KEYRING_BACKEND_ENV_VAR: &str = "KEYRING_BACKEND";
const GAS_LIMIT_ENV_VAR: &str = "GAS_LIMIT";

const DEFAULT_CHAIN_ID: &str = "pulsar-2";
const DEFAULT_LCD_URL: &str = "https://api.pulsar.scrttestnet.com";
const DEFAULT_RPC_URL: &str = "https://rpc.pulsar.scrttestnet.com";
const DEFAULT_SECRETCLI: &str = "secretcli";
const DEFAULT_KEY_NAME: &str = "business-card-demo";
const DEFAULT_KEYRING_BACKEND: &str = "test";

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: u32 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct DemoConfig {
    pub chain_id: String,
    pub lcd_url: String,
    pub rpc_url: String,
    pub secretcli: String,
    pub key_name: String,
    pub keyring_backend: String,
    pub gas_limit: u64,
}

impl DemoConfig {
    /// load from env (unset vars keep their testnet default), else local
    pub fn load() -> Self {
        dotenv::dotenv().ok();

        match Self::from_lookup(|name| std::env::var(name).ok()) {
            Ok(c) => {
                info!(chain_id = %c.chain_id, "loaded config from env");
                c
            }
            Err(e) => {
                warn!("failed to load config from env: {e}; using local config");
                Self::local()
            }
        }
    }

    fn local() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            lcd_url: DEFAULT_LCD_URL.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            secretcli: DEFAULT_SECRETCLI.to_string(),
            key_name: DEFAULT_KEY_NAME.to_string(),
            keyring_backend: DEFAULT_KEYRING_BACKEND.to_string(),
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Box<dyn Error>> {
        let local = Self::local();
        // set-but-empty counts as unset
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let var = |name: &str, default: String| lookup(name).unwrap_or(default);

        let gas_limit = match lookup(GAS_LIMIT_ENV_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("{GAS_LIMIT_ENV_VAR}={raw}: {e}"))?,
            None => local.gas_limit,
        };

        Ok(Self {
            chain_id: var(CHAIN_ID_ENV_VAR, local.chain_id),
            lcd_url: var(LCD_URL_ENV_VAR, local.lcd_url),
            rpc_url: var(RPC_URL_ENV_VAR, local.rpc_url),
            secretcli: var(SECRETCLI_ENV_VAR, local.secretcli),
            key_name: var(KEY_NAME_ENV_VAR, local.key_name),
            keyring_backend: var(KEYRING_BACKEND_ENV_VAR, local.keyring_backend),
            gas_limit,
        })
    }

    pub fn get_chain_network_config(&self) -> ChainNetworkConfig {
        ChainNetworkConfig {
            chain_id: self.chain_id.clone(),
            lcd_url: self.lcd_url.clone(),
            rpc_url: self.rpc_url.clone(),
            secretcli: self.secretcli.clone(),
            key_name: self.key_name.clone(),
            keyring_backend: self.keyring_backend.clone(),
            poll_interval: POLL_INTERVAL,
            max_polls: MAX_POLLS,
        }
    }

    pub fn get_workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            gas_limit: self.gas_limit,
            label_prefix: DEFAULT_LABEL_PREFIX.to_owned(),
        }
    }
}
