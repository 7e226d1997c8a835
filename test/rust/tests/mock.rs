use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use ethers::{
    types::{transaction::eip2718::TypedTransaction, Address, TransactionReceipt, H256, U256, U64},
    utils::parse_ether,
};
use inbox_deployer::{chain::DeployClient, errors::DeployError};

pub const DEPLOYER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const TX_HASH: &str = "0x28c505127565c429c5ed222b22d5d5ec18ed6c20b5caba8facb4cf568e77c435";

/// A chain call made against the mock, in the order it was made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Accounts,
    Balance(Address),
    EstimateGas,
    SendTransaction,
}

struct State {
    accounts: Vec<Address>,
    balance: U256,
    gas_estimate: Result<U256, String>,
    receipt: Result<TransactionReceipt, String>,
    calls: Vec<Call>,
    sent: Vec<TypedTransaction>,
    shutdowns: usize,
}

/// A `DeployClient` that answers from canned values and records every call.
/// Clones share state, so a test can keep one clone and hand the other to
/// the deployment.
#[derive(Clone)]
pub struct MockClient {
    state: Arc<Mutex<State>>,
}

pub fn successful_receipt() -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: TX_HASH.parse().unwrap(),
        contract_address: Some(CONTRACT.parse().unwrap()),
        status: Some(U64::one()),
        ..Default::default()
    }
}

impl MockClient {
    /// A client whose deployer holds 1 ether, whose gas estimate is 500,000,
    /// and whose submissions succeed.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                accounts: vec![DEPLOYER.parse().unwrap()],
                balance: parse_ether(1).unwrap(),
                gas_estimate: Ok(U256::from(500_000)),
                receipt: Ok(successful_receipt()),
                calls: vec![],
                sent: vec![],
                shutdowns: 0,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        self.state().accounts = accounts;
        self
    }

    pub fn with_balance(self, balance: U256) -> Self {
        self.state().balance = balance;
        self
    }

    pub fn with_gas_estimate(self, gas_estimate: u64) -> Self {
        self.state().gas_estimate = Ok(gas_estimate.into());
        self
    }

    pub fn with_failing_estimate(self, message: &str) -> Self {
        self.state().gas_estimate = Err(message.to_string());
        self
    }

    pub fn with_receipt(self, receipt: TransactionReceipt) -> Self {
        self.state().receipt = Ok(receipt);
        self
    }

    pub fn with_failing_send(self, message: &str) -> Self {
        self.state().receipt = Err(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn sent(&self) -> Vec<TypedTransaction> {
        self.state().sent.clone()
    }

    pub fn shutdowns(&self) -> usize {
        self.state().shutdowns
    }
}

#[async_trait]
impl DeployClient for MockClient {
    async fn accounts(&self) -> Result<Vec<Address>, DeployError> {
        let mut state = self.state();
        state.calls.push(Call::Accounts);
        Ok(state.accounts.clone())
    }

    async fn balance(&self, address: Address) -> Result<U256, DeployError> {
        let mut state = self.state();
        state.calls.push(Call::Balance(address));
        Ok(state.balance)
    }

    async fn estimate_gas(&self, _: &TypedTransaction) -> Result<U256, DeployError> {
        let mut state = self.state();
        state.calls.push(Call::EstimateGas);
        state.gas_estimate.clone().map_err(DeployError::Transaction)
    }

    async fn send_transaction(
        &self,
        tx: TypedTransaction,
    ) -> Result<TransactionReceipt, DeployError> {
        let mut state = self.state();
        state.calls.push(Call::SendTransaction);
        state.sent.push(tx);
        state.receipt.clone().map_err(DeployError::Transaction)
    }

    fn shutdown(&self) {
        self.state().shutdowns += 1;
    }
}

pub fn reverted_receipt() -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: H256::repeat_byte(0xab),
        contract_address: None,
        status: Some(U64::zero()),
        ..Default::default()
    }
}
