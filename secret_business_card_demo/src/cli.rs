use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use secret_business_card::{
    contracts::business_card::BusinessCard, types::contract::ContractHandle,
};

/// Upload, instantiate and use the secret business card contract
#[derive(Parser, Debug)]
#[command(name = "secret-business-card")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store the compiled contract and print its code id and hash
    Upload {
        /// Compiled contract bytecode
        #[arg(long, default_value = "contract.wasm")]
        wasm: PathBuf,
    },

    /// Look up the code hash of an uploaded code id
    CodeHash {
        #[arg(long)]
        code_id: u64,
    },

    /// Create a contract instance from uploaded code
    Instantiate {
        #[arg(long)]
        code_id: u64,

        #[arg(long)]
        code_hash: String,

        /// Entropy for the contract's key generation (random if omitted)
        #[arg(long)]
        entropy: Option<String>,
    },

    /// Store a business card in a slot
    CreateCard {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        card: CardArgs,

        #[arg(long, default_value_t = 0)]
        index: u8,
    },

    /// Generate a viewing key for a slot and print it
    CreateViewingKey {
        #[command(flatten)]
        contract: ContractArgs,

        #[arg(long, default_value_t = 0)]
        index: u8,
    },

    /// Read a business card back using a viewing key
    GetCard {
        #[command(flatten)]
        contract: ContractArgs,

        #[arg(long)]
        viewing_key: String,

        /// Owner of the card (defaults to this wallet)
        #[arg(long)]
        wallet: Option<String>,

        #[arg(long, default_value_t = 0)]
        index: u8,
    },

    /// Run every step in order against freshly uploaded code
    Demo {
        #[arg(long, default_value = "contract.wasm")]
        wasm: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Address of the instantiated contract
    #[arg(long = "contract")]
    pub contract_address: String,

    #[arg(long)]
    pub code_hash: String,
}

impl From<ContractArgs> for ContractHandle {
    fn from(args: ContractArgs) -> Self {
        ContractHandle {
            address: args.contract_address,
            code_hash: args.code_hash,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CardArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub phone: String,
}

impl From<CardArgs> for BusinessCard {
    fn from(args: CardArgs) -> Self {
        BusinessCard {
            name: args.name,
            address: args.address,
            phone: args.phone,
        }
    }
}
