pub mod secret_network;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::tx::TxResponse;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

#[derive(Clone, Debug)]
pub struct StoreCodeRequest {
    pub sender: String,
    pub wasm_byte_code: Vec<u8>,
    pub source: String,
    pub builder: String,
    pub gas_limit: u64,
}

#[derive(Clone, Debug)]
pub struct InstantiateRequest {
    pub sender: String,
    pub code_id: u64,
    pub code_hash: Option<String>,
    pub init_msg: Value,
    pub label: String,
    pub init_funds: Vec<Coin>,
    pub gas_limit: u64,
}

#[derive(Clone, Debug)]
pub struct ExecuteRequest {
    pub sender: String,
    pub contract_address: String,
    pub code_hash: Option<String>,
    pub msg: Value,
    pub sent_funds: Vec<Coin>,
    pub gas_limit: u64,
}

#[derive(Clone, Debug)]
pub struct QueryRequest {
    pub contract_address: String,
    pub code_hash: Option<String>,
    pub query: Value,
}

/// Signed transaction submission and state queries against the network.
///
/// Errors are whatever the underlying client reports; callers pass them on as-is.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn store_code(&self, request: StoreCodeRequest) -> anyhow::Result<TxResponse>;

    async fn code_hash_by_code_id(&self, code_id: u64) -> anyhow::Result<String>;

    async fn instantiate_contract(&self, request: InstantiateRequest) -> anyhow::Result<TxResponse>;

    async fn execute_contract(&self, request: ExecuteRequest) -> anyhow::Result<TxResponse>;

    async fn query_contract(&self, request: QueryRequest) -> anyhow::Result<Value>;
}
