mod cli;
mod client;
mod config;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use secret_business_card::{
    contracts::business_card::{BusinessCard, InstantiateMsg},
    types::contract::{ContractHandle, ContractReference},
    utils::random_entropy,
};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Commands},
    client::{get_workflow, SecretWorkflow},
    config::DemoConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = DemoConfig::load();
    let (credentials, workflow) = get_workflow(&config).await?;
    println!("Wallet: {}", credentials.address());

    match cli.command {
        Commands::Upload { wasm } => {
            let code = workflow.upload_contract_file(&wasm).await?;
            println!("codeId: {}", code.code_id);
            println!("Contract hash: {}", code.code_hash);
        }
        Commands::CodeHash { code_id } => {
            let code_hash = workflow.code_hash_by_code_id(code_id).await?;
            println!("Contract hash: {code_hash}");
        }
        Commands::Instantiate {
            code_id,
            code_hash,
            entropy,
        } => {
            let init_msg = InstantiateMsg {
                entropy: entropy.unwrap_or_else(random_entropy),
            };
            let contract_address = workflow
                .instantiate_contract(code_id, &code_hash, &init_msg)
                .await?;
            println!("{contract_address}");
        }
        Commands::CreateCard {
            contract,
            card,
            index,
        } => {
            let tx = workflow
                .create_card(&contract.into(), card.into(), index)
                .await?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        Commands::CreateViewingKey { contract, index } => {
            let viewing_key = workflow.create_viewing_key(&contract.into(), index).await?;
            println!("{viewing_key}");
        }
        Commands::GetCard {
            contract,
            viewing_key,
            wallet,
            index,
        } => {
            let wallet = wallet.unwrap_or_else(|| credentials.address().to_owned());
            let response = workflow
                .get_business_card(&contract.into(), &wallet, &viewing_key, index)
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Demo { wasm } => full_demo(&workflow, &wasm).await?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run thru every step, feeding each step's output into the next.
async fn full_demo(workflow: &SecretWorkflow, wasm: &Path) -> Result<()> {
    println!("\n########## UPLOAD ###########\n");
    let code = workflow.upload_contract_file(wasm).await?;
    println!("codeId: {}", code.code_id);
    println!("Contract hash: {}", code.code_hash);

    println!("\n########## INSTANTIATE ###########\n");
    let init_msg = InstantiateMsg {
        entropy: random_entropy(),
    };
    let contract_address = workflow
        .instantiate_contract(code.code_id, &code.code_hash, &init_msg)
        .await?;
    let reference = ContractReference::new(code, contract_address);
    println!("Contract address: {}", reference.contract_address);
    let contract: ContractHandle = reference.handle();

    println!("\n########## CREATE CARD ###########\n");
    let card = BusinessCard {
        name: "Theo".to_owned(),
        address: "6969 Cool St".to_owned(),
        phone: "7032201994".to_owned(),
    };
    let tx = workflow.create_card(&contract, card, 0).await?;
    println!("Card stored in tx {}", tx.txhash);

    println!("\n########## VIEWING KEY ###########\n");
    let viewing_key = workflow.create_viewing_key(&contract, 0).await?;
    println!("Viewing key: {viewing_key}");

    println!("\n########## GET CARD ###########\n");
    let response = workflow
        .get_business_card(&contract, workflow.sender(), &viewing_key, 0)
        .await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    println!("\n########## END OF DEMO ###########\n");
    println!("{reference:#?}");

    Ok(())
}
