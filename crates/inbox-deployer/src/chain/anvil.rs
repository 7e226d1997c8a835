use ethers::utils::{Anvil, AnvilInstance};
use tokio::{
    process::Command,
    task::{self, JoinError},
};

use crate::errors::DeployError;

/// Starts `program` as a local anvil node whose accounts are derived from
/// `mnemonic`. A missing binary, or a node that never comes up, is a client
/// error rather than a panic.
pub async fn spawn_anvil(program: &str, mnemonic: &str) -> Result<AnvilInstance, DeployError> {
    Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|e| DeployError::Client(format!("couldn't start {program}: {e}")))?;

    // `Anvil::spawn` blocks until the node is listening and panics on any
    // startup failure.
    let builder = Anvil::at(program).mnemonic(mnemonic);
    task::spawn_blocking(move || builder.spawn())
        .await
        .map_err(|e| DeployError::Client(format!("couldn't start {program}: {}", panic_message(e))))
}

fn panic_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => payload
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
            .unwrap_or_else(|| "anvil panicked".to_string()),
        Err(err) => err.to_string(),
    }
}
