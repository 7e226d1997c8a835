use std::time::Duration;

/// The settings that must be present (and non-empty) in the environment.
pub const REQUIRED_SETTINGS: [&str; 3] = ["MNEMONIC", "INFURA_API_KEY", "INITIAL_MESSAGE"];

/// The network used when none is given on the command line.
pub const DEFAULT_NETWORK: &str = "rinkeby";

/// The artifact path used when neither `--artifact` nor `CONTRACT_ARTIFACT`
/// is set.
pub const DEFAULT_ARTIFACT_PATH: &str = "build/Inbox.json";

/// The minimum deployer balance, 0.1 ether in wei.
pub const MIN_DEPLOYER_BALANCE: u64 = 100_000_000_000_000_000;

/// The most gas a deployment transaction is ever allowed.
pub const GAS_LIMIT_CAP: u64 = 1_000_000;

/// The gas price paid for the deployment, 20 gwei.
pub const GAS_PRICE: u64 = 20_000_000_000;

// The estimate is scaled by 6/5 to leave a 20% margin.
pub const GAS_MARGIN_NUMERATOR: u64 = 6;
pub const GAS_MARGIN_DENOMINATOR: u64 = 5;

/// How often the provider polls for the deployment receipt.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// The polling interval against a local anvil node.
pub const ANVIL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// The anvil binary spawned for the local network, looked up on `PATH`.
pub const ANVIL_PROGRAM: &str = "anvil";
