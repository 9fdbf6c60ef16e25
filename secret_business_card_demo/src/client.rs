use std::{env, sync::Arc};

use anyhow::Context;
use dotenv::dotenv;
use secret_business_card::{
    chain::secret_network::SecretNetworkClient, wallet::Credentials,
    workflow::BusinessCardWorkflow,
};

use crate::config::DemoConfig;

const MNEMONIC_ENV_VAR: &str = "MNEMONIC";

pub type SecretWorkflow = BusinessCardWorkflow<SecretNetworkClient>;

pub fn load_credentials() -> anyhow::Result<Credentials> {
    dotenv().ok();

    let seed = env::var(MNEMONIC_ENV_VAR)
        .with_context(|| format!("{MNEMONIC_ENV_VAR} must be set in the environment or .env"))?;

    Credentials::from_mnemonic(&seed).context("could not load wallet from mnemonic")
}

/// Wallet + secretcli-backed workflow, with the wallet's key present in the keyring.
pub async fn get_workflow(config: &DemoConfig) -> anyhow::Result<(Credentials, SecretWorkflow)> {
    let credentials = load_credentials()?;

    let client = SecretNetworkClient::new(config.get_chain_network_config());
    client.import_key(&credentials).await?;

    let workflow = BusinessCardWorkflow::new(
        Arc::new(client),
        credentials.address(),
        config.get_workflow_config(),
    );
    Ok((credentials, workflow))
}
