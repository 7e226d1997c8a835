use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};
use ethers::{types::Address, utils::to_checksum};
use serde::{Deserialize, Serialize, Serializer};

/// The result of a successful contract deployment. One of these is written to
/// disk per deployment and is never read back or updated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub network: String,
    #[serde(serialize_with = "serialize_checksummed")]
    pub contract_address: Address,
    #[serde(serialize_with = "serialize_timestamp")]
    pub deployment_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_checksummed")]
    pub deployer: Address,
    pub initial_message: String,
}

impl DeploymentRecord {
    /// The name of the file this record is written to. The date is the UTC
    /// calendar date of the deployment, so two deployments to the same
    /// network on the same day share a file name.
    pub fn file_name(&self) -> String {
        format!(
            "deployment-{}-{}.json",
            self.network,
            self.deployment_time.format("%Y-%m-%d")
        )
    }

    /// Serializes the record as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the record into `dir`, replacing any existing file with the same
    /// name, and returns the path that was written.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_json()?)?;
        Ok(path)
    }
}

fn serialize_checksummed<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_checksum(address, None))
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
