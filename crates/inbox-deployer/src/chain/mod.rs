mod anvil;
mod wallets;

use std::sync::Mutex;

use async_trait::async_trait;
use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{transaction::eip2718::TypedTransaction, Address, TransactionReceipt, U256},
    utils::AnvilInstance,
};
use tracing::{debug, info};
pub use anvil::spawn_anvil;
pub use wallets::derive_wallets;

use crate::{
    config::DeployConfig,
    constants::{ANVIL_POLL_INTERVAL, ANVIL_PROGRAM, POLL_INTERVAL},
    errors::DeployError,
    network::Endpoint,
};

/// The chain operations a deployment needs. `ChainClient` talks to a real
/// node; tests substitute their own implementation.
#[async_trait]
pub trait DeployClient: Send + Sync {
    /// The accounts derived from the seed phrase, in derivation order.
    async fn accounts(&self) -> Result<Vec<Address>, DeployError>;

    /// The balance of `address` in wei.
    async fn balance(&self, address: Address) -> Result<U256, DeployError>;

    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, DeployError>;

    /// Signs and submits `tx`, resolving once it has been mined.
    async fn send_transaction(
        &self,
        tx: TypedTransaction,
    ) -> Result<TransactionReceipt, DeployError>;

    /// Releases the underlying transport. Called once, after the deployment
    /// has finished or failed.
    fn shutdown(&self);
}

/// A client that signs with the first account derived from the configured
/// mnemonic.
pub struct ChainClient {
    inner: SignerMiddleware<Provider<Http>, LocalWallet>,
    accounts: Vec<Address>,
    maybe_anvil: Mutex<Option<AnvilInstance>>,
}

impl ChainClient {
    /// Connects to the endpoint. Connecting to `Endpoint::Anvil` spawns a
    /// local node funded from the same mnemonic; it lives until `shutdown`.
    pub async fn connect(endpoint: &Endpoint, config: &DeployConfig) -> Result<Self, DeployError> {
        let wallets = derive_wallets(
            &config.mnemonic,
            config.address_index,
            config.number_of_addresses,
        )?;
        let accounts = wallets.iter().map(|w| w.address()).collect::<Vec<_>>();
        let signer = wallets.into_iter().next().ok_or_else(|| {
            DeployError::Client("the mnemonic did not derive any accounts".to_string())
        })?;

        let (provider, maybe_anvil) = match endpoint {
            Endpoint::Remote(rpc_url) => {
                let provider = Provider::<Http>::try_from(rpc_url.as_str())
                    .map_err(|e| DeployError::Client(e.to_string()))?
                    .interval(POLL_INTERVAL);
                (provider, None)
            }
            Endpoint::Anvil => {
                let anvil = spawn_anvil(ANVIL_PROGRAM, &config.mnemonic).await?;
                info!(endpoint = %anvil.endpoint(), "spawned local anvil node");
                let provider = Provider::<Http>::try_from(anvil.endpoint())
                    .map_err(|e| DeployError::Client(e.to_string()))?
                    .interval(ANVIL_POLL_INTERVAL);
                (provider, Some(anvil))
            }
        };

        // The chain id is fetched from the node so that the signer produces
        // replay-protected transactions.
        let inner = SignerMiddleware::new_with_provider_chain(provider, signer)
            .await
            .map_err(|e| DeployError::Client(e.to_string()))?;
        debug!(chain_id = inner.signer().chain_id(), "connected");

        Ok(Self {
            inner,
            accounts,
            maybe_anvil: Mutex::new(maybe_anvil),
        })
    }
}

#[async_trait]
impl DeployClient for ChainClient {
    async fn accounts(&self) -> Result<Vec<Address>, DeployError> {
        Ok(self.accounts.clone())
    }

    async fn balance(&self, address: Address) -> Result<U256, DeployError> {
        self.inner
            .get_balance(address, None)
            .await
            .map_err(|e| DeployError::Client(e.to_string()))
    }

    async fn estimate_gas(&self, tx: &TypedTransaction) -> Result<U256, DeployError> {
        self.inner
            .estimate_gas(tx, None)
            .await
            .map_err(|e| DeployError::Transaction(e.to_string()))
    }

    async fn send_transaction(
        &self,
        tx: TypedTransaction,
    ) -> Result<TransactionReceipt, DeployError> {
        let pending = self
            .inner
            .send_transaction(tx, None)
            .await
            .map_err(|e| DeployError::Transaction(e.to_string()))?;
        let tx_hash = pending.tx_hash();
        info!(?tx_hash, "submitted deployment transaction");

        pending
            .await
            .map_err(|e| DeployError::Transaction(e.to_string()))?
            .ok_or_else(|| {
                DeployError::Transaction(format!(
                    "transaction {tx_hash:?} was dropped from the mempool"
                ))
            })
    }

    fn shutdown(&self) {
        let maybe_anvil = match self.maybe_anvil.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        // Dropping the instance kills the anvil process.
        if let Some(anvil) = maybe_anvil {
            info!(endpoint = %anvil.endpoint(), "stopping local anvil node");
            drop(anvil);
        } else {
            debug!("http provider has no transport to release");
        }
    }
}
