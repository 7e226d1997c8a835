/// This module loads the deployer's settings from the environment. The
/// settings are read once at start-up and handed to the rest of the program
/// as a `DeployConfig`.
use std::{collections::HashMap, env, ffi::OsString, fmt};

use serde::Deserialize;

use crate::{constants::REQUIRED_SETTINGS, errors::DeployError};

fn default_number_of_addresses() -> u32 {
    1
}

#[derive(Clone, Deserialize)]
pub struct DeployConfig {
    /// The seed phrase the deployer account is derived from.
    pub mnemonic: String,
    pub infura_api_key: String,
    /// The constructor argument of the deployed contract.
    pub initial_message: String,
    /// The HD derivation index of the first account.
    #[serde(default)]
    pub address_index: u32,
    /// The number of accounts derived from the mnemonic. The first one signs
    /// the deployment.
    #[serde(default = "default_number_of_addresses")]
    pub number_of_addresses: u32,
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("mnemonic", &"<redacted>")
            .field("infura_api_key", &"<redacted>")
            .field("initial_message", &self.initial_message)
            .field("address_index", &self.address_index)
            .field("number_of_addresses", &self.number_of_addresses)
            .finish()
    }
}

impl DeployConfig {
    /// Loads the config from the process environment.
    pub fn from_env() -> Result<Self, DeployError> {
        Self::from_os_vars(env::vars_os())
    }

    /// Like `from_vars`, but skips any pair that isn't valid Unicode. A
    /// required setting with a non-Unicode value is reported as missing.
    pub fn from_os_vars<I>(vars: I) -> Result<Self, DeployError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(
            vars.into_iter()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Loads the config from a set of key-value pairs. Every required setting
    /// that is absent or empty is reported at once.
    pub fn from_vars<I>(vars: I) -> Result<Self, DeployError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = vars.into_iter().collect::<HashMap<_, _>>();

        let missing = REQUIRED_SETTINGS
            .iter()
            .filter(|name| vars.get(**name).map_or(true, |value| value.is_empty()))
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(DeployError::Configuration { missing });
        }

        envy::from_iter(vars).map_err(|e| DeployError::InvalidConfiguration(e.to_string()))
    }
}
