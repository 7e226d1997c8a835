/// This module contains the deployment workflow: pick the deployer, check its
/// balance, build and price the contract-creation transaction, submit it, and
/// record the result.
use std::path::{Path, PathBuf};

use chrono::Utc;
use deployment_record::DeploymentRecord;
use ethers::{
    abi::Token,
    types::{
        transaction::eip2718::TypedTransaction, Address, TransactionRequest, H256, U256, U64,
    },
    utils::format_ether,
};
use tracing::info;

use crate::{
    artifact::ContractArtifact,
    chain::DeployClient,
    constants::{
        GAS_LIMIT_CAP, GAS_MARGIN_DENOMINATOR, GAS_MARGIN_NUMERATOR, GAS_PRICE,
        MIN_DEPLOYER_BALANCE,
    },
    errors::DeployError,
    network::NetworkRegistry,
};

/// What a successful deployment produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub network: String,
    pub deployer: Address,
    pub contract_address: Address,
    pub transaction_hash: H256,
    pub gas_estimate: U256,
    /// The gas limit the transaction was sent with.
    pub gas_limit: U256,
}

/// A deployment that made it on chain and was written to disk.
#[derive(Clone, Debug)]
pub struct RecordedDeployment {
    pub outcome: DeploymentOutcome,
    pub record: DeploymentRecord,
    pub path: PathBuf,
}

/// Pads a gas estimate by 20% and clamps it to `GAS_LIMIT_CAP`. The margin is
/// rounded down.
pub fn padded_gas_limit(estimate: U256) -> U256 {
    let padded = estimate.saturating_mul(U256::from(GAS_MARGIN_NUMERATOR))
        / U256::from(GAS_MARGIN_DENOMINATOR);
    padded.min(U256::from(GAS_LIMIT_CAP))
}

/// Everything a deployment needs apart from the client it runs against.
pub struct Deployment<'a> {
    registry: &'a NetworkRegistry,
    artifact: &'a ContractArtifact,
    initial_message: &'a str,
}

impl<'a> Deployment<'a> {
    pub fn new(
        registry: &'a NetworkRegistry,
        artifact: &'a ContractArtifact,
        initial_message: &'a str,
    ) -> Self {
        Self {
            registry,
            artifact,
            initial_message,
        }
    }

    /// Deploys the contract to `network`. Any failure aborts the deployment
    /// before the next chain call is made.
    pub async fn run<C: DeployClient + ?Sized>(
        &self,
        client: &C,
        network: &str,
    ) -> Result<DeploymentOutcome, DeployError> {
        // An unknown network is rejected before the client is touched.
        self.registry.resolve(network)?;
        info!("starting deployment to {}", network.to_uppercase());

        // The first derived account pays for the deployment.
        let deployer = client
            .accounts()
            .await?
            .first()
            .copied()
            .ok_or_else(|| DeployError::Client("provider has no accounts".to_string()))?;
        info!(?deployer, "deployer account");

        let balance = client.balance(deployer).await?;
        info!("account balance: {} ETH", format_ether(balance));
        let minimum = U256::from(MIN_DEPLOYER_BALANCE);
        if balance < minimum {
            return Err(DeployError::InsufficientFunds { balance, minimum });
        }

        // Build the contract-creation transaction. It has no recipient and
        // carries the bytecode with the encoded initial message appended.
        info!(initial_message = self.initial_message, "deploying contract");
        let data = self
            .artifact
            .deploy_data(&[Token::String(self.initial_message.to_string())])?;
        let mut tx: TypedTransaction = TransactionRequest::new()
            .from(deployer)
            .data(data)
            .gas_price(GAS_PRICE)
            .into();

        let gas_estimate = client.estimate_gas(&tx).await?;
        let gas_limit = padded_gas_limit(gas_estimate);
        info!(%gas_estimate, %gas_limit, "estimated gas");
        tx.set_gas(gas_limit);

        let receipt = client.send_transaction(tx).await?;
        if receipt.status == Some(U64::zero()) {
            return Err(DeployError::Transaction(format!(
                "deployment transaction {:?} reverted",
                receipt.transaction_hash
            )));
        }
        let contract_address = receipt.contract_address.ok_or_else(|| {
            DeployError::Transaction(format!(
                "receipt for {:?} has no contract address",
                receipt.transaction_hash
            ))
        })?;

        info!(
            ?contract_address,
            transaction_hash = ?receipt.transaction_hash,
            network,
            %gas_estimate,
            "deployment successful"
        );

        Ok(DeploymentOutcome {
            network: network.to_string(),
            deployer,
            contract_address,
            transaction_hash: receipt.transaction_hash,
            gas_estimate,
            gas_limit,
        })
    }

    /// Runs the deployment and writes its record into `output_dir`. The client
    /// is shut down exactly once, whether or not the deployment succeeds.
    pub async fn run_and_record<C: DeployClient>(
        &self,
        client: C,
        network: &str,
        output_dir: &Path,
    ) -> Result<RecordedDeployment, DeployError> {
        let result = self.deploy_and_write(&client, network, output_dir).await;
        client.shutdown();
        result
    }

    async fn deploy_and_write<C: DeployClient>(
        &self,
        client: &C,
        network: &str,
        output_dir: &Path,
    ) -> Result<RecordedDeployment, DeployError> {
        let outcome = self.run(client, network).await?;
        let record = DeploymentRecord {
            network: outcome.network.clone(),
            contract_address: outcome.contract_address,
            deployment_time: Utc::now(),
            deployer: outcome.deployer,
            initial_message: self.initial_message.to_string(),
        };
        let path = record
            .write_to(output_dir)
            .map_err(|e| DeployError::Record(e.to_string()))?;
        info!(path = %path.display(), "saved deployment record");

        Ok(RecordedDeployment {
            outcome,
            record,
            path,
        })
    }
}
