use ethers::{types::U256, utils::format_ether};
use thiserror::Error;

/// Everything that can abort a deployment. None of these are retried; the
/// binary reports the error and exits with a failure code.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("missing required environment variables:\n{}", format_missing(.missing))]
    Configuration { missing: Vec<String> },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unsupported network: {network} (supported: {})", .supported.join(", "))]
    UnsupportedNetwork {
        network: String,
        supported: Vec<String>,
    },

    #[error(
        "insufficient funds for deployment: balance is {} ETH, at least {} ETH is required",
        ether(.balance),
        ether(.minimum)
    )]
    InsufficientFunds { balance: U256, minimum: U256 },

    #[error("{0}")]
    Transaction(String),

    #[error("client error: {0}")]
    Client(String),

    #[error("invalid contract artifact: {0}")]
    Artifact(String),

    #[error("failed to record deployment: {0}")]
    Record(String),
}

fn ether(amount: &U256) -> String {
    format_ether(*amount)
}

fn format_missing(missing: &[String]) -> String {
    missing
        .iter()
        .map(|name| format!("- {name}"))
        .collect::<Vec<_>>()
        .join("\n")
}
