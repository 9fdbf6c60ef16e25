use std::{path::Path, sync::Arc};

use tracing::{debug, info};

use crate::{
    chain::{ChainClient, ExecuteRequest, InstantiateRequest, QueryRequest, StoreCodeRequest},
    config::WorkflowConfig,
    contracts::business_card::{BusinessCard, ExecuteMsg, GetCardResponse, InstantiateMsg, QueryMsg},
    error::WorkflowError,
    types::{
        contract::{ContractHandle, UploadedCode},
        tx::{TxResponse, WASM_EVENT_TYPE},
    },
    utils::{find_log_value, random_label},
};

const MESSAGE_EVENT_TYPE: &str = "message";

/// The business card steps, each one a single round trip through the chain client.
///
/// Nothing is carried between calls; identifiers produced by one step are passed
/// explicitly into the next.
pub struct BusinessCardWorkflow<C> {
    client: Arc<C>,
    sender: String,
    config: WorkflowConfig,
}

impl<C> BusinessCardWorkflow<C>
where
    C: ChainClient,
{
    pub fn new(client: Arc<C>, sender: impl Into<String>, config: WorkflowConfig) -> Self {
        Self {
            client,
            sender: sender.into(),
            config,
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub async fn upload_contract_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<UploadedCode, WorkflowError> {
        let path = path.as_ref();
        let bytecode = tokio::fs::read(path)
            .await
            .map_err(|source| WorkflowError::Bytecode {
                path: path.to_path_buf(),
                source,
            })?;

        self.upload_contract(bytecode).await
    }

    /// Stores the bytecode on chain, then looks up the hash of the new code id.
    pub async fn upload_contract(
        &self,
        wasm_byte_code: Vec<u8>,
    ) -> Result<UploadedCode, WorkflowError> {
        info!(bytes = wasm_byte_code.len(), "uploading contract code");

        let tx = self
            .client
            .store_code(StoreCodeRequest {
                sender: self.sender.clone(),
                wasm_byte_code,
                source: String::new(),
                builder: String::new(),
                gas_limit: self.config.gas_limit,
            })
            .await?;

        let raw_code_id = required_log_value(&tx, MESSAGE_EVENT_TYPE, "code_id")?;
        let code_id: u64 = raw_code_id
            .parse()
            .map_err(|_| WorkflowError::InvalidCodeId { value: raw_code_id })?;
        info!(code_id, txhash = %tx.txhash, "contract code stored");

        let code_hash = self.code_hash_by_code_id(code_id).await?;

        Ok(UploadedCode { code_id, code_hash })
    }

    pub async fn code_hash_by_code_id(&self, code_id: u64) -> Result<String, WorkflowError> {
        let code_hash = self.client.code_hash_by_code_id(code_id).await?;
        debug!(code_id, %code_hash, "resolved code hash");
        Ok(code_hash)
    }

    /// Creates a new contract instance under a freshly randomized label.
    pub async fn instantiate_contract(
        &self,
        code_id: u64,
        code_hash: &str,
        init_msg: &InstantiateMsg,
    ) -> Result<String, WorkflowError> {
        let label = random_label(&self.config.label_prefix);
        info!(code_id, %label, "instantiating contract");

        let tx = self
            .client
            .instantiate_contract(InstantiateRequest {
                sender: self.sender.clone(),
                code_id,
                code_hash: Some(code_hash.to_owned()),
                init_msg: serde_json::to_value(init_msg)?,
                label,
                init_funds: vec![],
                gas_limit: self.config.gas_limit,
            })
            .await?;

        let contract_address = required_log_value(&tx, MESSAGE_EVENT_TYPE, "contract_address")?;
        info!(%contract_address, txhash = %tx.txhash, "contract instantiated");

        Ok(contract_address)
    }

    /// Stores `card` in slot `index`; the raw transaction is returned for inspection.
    pub async fn create_card(
        &self,
        contract: &ContractHandle,
        card: BusinessCard,
        index: u8,
    ) -> Result<TxResponse, WorkflowError> {
        info!(contract = %contract.address, index, "creating business card");
        self.execute(contract, &ExecuteMsg::Create { card, index })
            .await
    }

    pub async fn create_viewing_key(
        &self,
        contract: &ContractHandle,
        index: u8,
    ) -> Result<String, WorkflowError> {
        info!(contract = %contract.address, index, "generating viewing key");

        let tx = self
            .execute(contract, &ExecuteMsg::GenerateViewingKey { index })
            .await?;

        required_log_value(&tx, WASM_EVENT_TYPE, "viewing_key")
    }

    /// Reads a card back. The contract refuses if `viewing_key` was not issued
    /// to `wallet` for `index`.
    pub async fn get_business_card(
        &self,
        contract: &ContractHandle,
        wallet: &str,
        viewing_key: &str,
        index: u8,
    ) -> Result<GetCardResponse, WorkflowError> {
        info!(contract = %contract.address, %wallet, index, "querying business card");

        let query = QueryMsg::GetCard {
            wallet: wallet.to_owned(),
            viewing_key: viewing_key.to_owned(),
            index,
        };
        let response = self
            .client
            .query_contract(QueryRequest {
                contract_address: contract.address.clone(),
                code_hash: Some(contract.code_hash.clone()),
                query: serde_json::to_value(query)?,
            })
            .await?;

        Ok(serde_json::from_value(response)?)
    }

    async fn execute(
        &self,
        contract: &ContractHandle,
        msg: &ExecuteMsg,
    ) -> Result<TxResponse, WorkflowError> {
        let tx = self
            .client
            .execute_contract(ExecuteRequest {
                sender: self.sender.clone(),
                contract_address: contract.address.clone(),
                code_hash: Some(contract.code_hash.clone()),
                msg: serde_json::to_value(msg)?,
                sent_funds: vec![],
                gas_limit: self.config.gas_limit,
            })
            .await?;
        debug!(txhash = %tx.txhash, "contract executed");

        Ok(tx)
    }
}

fn required_log_value(
    tx: &TxResponse,
    event_type: &str,
    key: &str,
) -> Result<String, WorkflowError> {
    find_log_value(&tx.log_entries(), event_type, key)
        .map(str::to_owned)
        .ok_or_else(|| WorkflowError::MissingLogEntry {
            event_type: event_type.to_owned(),
            key: key.to_owned(),
        })
}
