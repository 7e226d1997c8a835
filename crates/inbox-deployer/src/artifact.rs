/// This module provides the `ContractArtifact` struct, the compiler output
/// that a deployment is built from. Both the legacy `solc` output shape
/// (`interface` holding the ABI as a JSON string) and the Foundry/Hardhat
/// shape (`abi` as a JSON array, `bytecode` optionally nested in an `object`)
/// are accepted.
use std::{fs, path::Path};

use ethers::{
    abi::{Abi, Token},
    types::Bytes,
    utils::hex,
};
use serde::Deserialize;

use crate::errors::DeployError;

#[derive(Clone, Debug)]
pub struct ContractArtifact {
    pub abi: Abi,
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAbi {
    Encoded(String),
    Parsed(Abi),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

#[derive(Deserialize)]
struct RawArtifact {
    #[serde(alias = "interface")]
    abi: RawAbi,
    bytecode: RawBytecode,
}

impl ContractArtifact {
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| DeployError::Artifact(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, DeployError> {
        let raw = serde_json::from_str::<RawArtifact>(raw)
            .map_err(|e| DeployError::Artifact(e.to_string()))?;

        let abi = match raw.abi {
            RawAbi::Encoded(encoded) => serde_json::from_str::<Abi>(&encoded)
                .map_err(|e| DeployError::Artifact(format!("malformed interface: {e}")))?,
            RawAbi::Parsed(abi) => abi,
        };
        let bytecode = match raw.bytecode {
            RawBytecode::Hex(code) | RawBytecode::Object { object: code } => code,
        };
        let bytecode = hex::decode(bytecode.trim().trim_start_matches("0x"))
            .map_err(|e| DeployError::Artifact(format!("malformed bytecode: {e}")))?;
        if bytecode.is_empty() {
            return Err(DeployError::Artifact(
                "artifact contains no bytecode".to_string(),
            ));
        }

        Ok(Self {
            abi,
            bytecode: bytecode.into(),
        })
    }

    /// The data of a contract-creation transaction: the bytecode followed by
    /// the ABI-encoded constructor arguments.
    pub fn deploy_data(&self, args: &[Token]) -> Result<Bytes, DeployError> {
        match self.abi.constructor() {
            Some(constructor) => constructor
                .encode_input(self.bytecode.to_vec(), args)
                .map(Bytes::from)
                .map_err(|e| DeployError::Artifact(format!("bad constructor arguments: {e}"))),
            None if args.is_empty() => Ok(self.bytecode.clone()),
            None => Err(DeployError::Artifact(
                "constructor arguments given but the ABI has no constructor".to_string(),
            )),
        }
    }
}
