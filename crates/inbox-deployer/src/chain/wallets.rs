use ethers::signers::{coins_bip39::English, LocalWallet, MnemonicBuilder};

use crate::errors::DeployError;

/// Derives `count` wallets from the mnemonic, starting at `first_index` on
/// the default Ethereum derivation path.
pub fn derive_wallets(
    mnemonic: &str,
    first_index: u32,
    count: u32,
) -> Result<Vec<LocalWallet>, DeployError> {
    let mut builder = MnemonicBuilder::<English>::default().phrase(mnemonic);
    let mut wallets = vec![];
    for i in 0..count {
        let index = first_index
            .checked_add(i)
            .ok_or_else(|| DeployError::Client("derivation index overflow".to_string()))?;
        builder = builder
            .index(index)
            .map_err(|e| DeployError::Client(e.to_string()))?;
        wallets.push(
            builder
                .build()
                .map_err(|e| DeployError::Client(format!("couldn't derive account: {e}")))?,
        );
    }
    Ok(wallets)
}
