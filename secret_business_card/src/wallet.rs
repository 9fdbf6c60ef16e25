use std::fmt;

use bech32::{ToBase32, Variant};
use ethers::{
    core::k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey},
    signers::{coins_bip39::English, MnemonicBuilder},
};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::CredentialsError;

pub const SECRET_ADDRESS_PREFIX: &str = "secret";
/// coin type 529 is SCRT
pub const SECRET_DERIVATION_PATH: &str = "m/44'/529'/0'/0/0";

/// The wallet used to sign every transaction, loaded once and never changed.
#[derive(Clone)]
pub struct Credentials {
    mnemonic: String,
    address: String,
}

impl Credentials {
    pub fn from_mnemonic(mnemonic: &str) -> Result<Self, CredentialsError> {
        let mnemonic = mnemonic.trim();
        let address = derive_address(mnemonic)?;

        Ok(Self {
            mnemonic: mnemonic.to_owned(),
            address,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn mnemonic(&self) -> &str {
        &self.mnemonic
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// bech32(`secret`, ripemd160(sha256(compressed secp256k1 pubkey)))
fn derive_address(mnemonic: &str) -> Result<String, CredentialsError> {
    let wallet = MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .derivation_path(SECRET_DERIVATION_PATH)?
        .build()?;

    let public_key = PublicKey::from(wallet.signer().verifying_key());
    let compressed = public_key.to_encoded_point(true);

    let account_id = Ripemd160::digest(Sha256::digest(compressed.as_bytes()));

    Ok(bech32::encode(
        SECRET_ADDRESS_PREFIX,
        account_id.to_base32(),
        Variant::Bech32,
    )?)
}
