/// Result of a code upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedCode {
    pub code_id: u64,
    pub code_hash: String,
}

/// An instantiated contract, as needed to execute or query it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractHandle {
    pub address: String,
    /// optional for the chain, but saves it a lookup
    pub code_hash: String,
}

/// Everything known about a deployed contract after upload + instantiate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractReference {
    pub code_id: u64,
    pub code_hash: String,
    pub contract_address: String,
}

impl ContractReference {
    pub fn new(code: UploadedCode, contract_address: String) -> Self {
        Self {
            code_id: code.code_id,
            code_hash: code.code_hash,
            contract_address,
        }
    }

    pub fn handle(&self) -> ContractHandle {
        ContractHandle {
            address: self.contract_address.clone(),
            code_hash: self.code_hash.clone(),
        }
    }
}
