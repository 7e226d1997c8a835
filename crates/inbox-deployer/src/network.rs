use crate::errors::DeployError;

const API_KEY_PLACEHOLDER: &str = "{api_key}";

/// Where a network's node lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// A hosted node reachable over HTTP.
    Remote(String),
    /// A local anvil node that the deployer spawns and tears down itself.
    Anvil,
}

// Infura hosted networks, keyed by name.
const HOSTED_NETWORKS: [(&str, &str); 4] = [
    ("mainnet", "https://mainnet.infura.io/v3/{api_key}"),
    ("rinkeby", "https://rinkeby.infura.io/v3/{api_key}"),
    ("goerli", "https://goerli.infura.io/v3/{api_key}"),
    ("sepolia", "https://sepolia.infura.io/v3/{api_key}"),
];

const ANVIL_NETWORK: &str = "anvil";

/// The fixed set of networks the deployer knows how to reach.
#[derive(Clone)]
pub struct NetworkRegistry {
    api_key: String,
}

impl NetworkRegistry {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// The names of every supported network.
    pub fn names(&self) -> Vec<String> {
        HOSTED_NETWORKS
            .iter()
            .map(|(name, _)| name.to_string())
            .chain(std::iter::once(ANVIL_NETWORK.to_string()))
            .collect()
    }

    pub fn contains(&self, network: &str) -> bool {
        network == ANVIL_NETWORK || HOSTED_NETWORKS.iter().any(|(name, _)| *name == network)
    }

    /// Resolves a network name to its endpoint. This never touches the
    /// network, so an unknown name fails before anything is allocated.
    pub fn resolve(&self, network: &str) -> Result<Endpoint, DeployError> {
        if network == ANVIL_NETWORK {
            return Ok(Endpoint::Anvil);
        }
        HOSTED_NETWORKS
            .iter()
            .find(|(name, _)| *name == network)
            .map(|(_, template)| {
                Endpoint::Remote(template.replace(API_KEY_PLACEHOLDER, &self.api_key))
            })
            .ok_or_else(|| DeployError::UnsupportedNetwork {
                network: network.to_string(),
                supported: self.names(),
            })
    }
}
