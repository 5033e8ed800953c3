//! Deployment metadata: where the contract lives on each network.

use crate::abi::JsonAbi;
use crate::error::DappError;
use crate::types::{Address, NetworkId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Deployment of the contract on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDeployment {
    pub address: Address,
    #[serde(
        rename = "transactionHash",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_hash: Option<String>,
}

/// Build artifact of the contract: per-network deployments and the interface
/// description. Other artifact fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentMetadata {
    #[serde(default, rename = "contractName", skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    #[serde(default)]
    pub networks: HashMap<NetworkId, NetworkDeployment>,
    #[serde(default)]
    pub abi: JsonAbi,
}

impl DeploymentMetadata {
    pub fn from_json_str(content: &str) -> Result<Self, DappError> {
        serde_json::from_str(content).map_err(|e| DappError::Metadata(e.to_string()))
    }

    pub fn from_slice(content: &[u8]) -> Result<Self, DappError> {
        serde_json::from_slice(content).map_err(|e| DappError::Metadata(e.to_string()))
    }

    pub fn deployment(&self, network_id: &NetworkId) -> Option<&NetworkDeployment> {
        self.networks.get(network_id)
    }

    /// Networks with a deployment, sorted for stable display
    pub fn network_ids(&self) -> Vec<&NetworkId> {
        let mut ids: Vec<_> = self.networks.keys().collect();
        ids.sort();
        ids
    }
}

/// Where the deployment metadata is read from
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn load(&self) -> Result<DeploymentMetadata, DappError>;
}

/// Already loaded metadata
#[async_trait]
impl MetadataSource for DeploymentMetadata {
    async fn load(&self) -> Result<DeploymentMetadata, DappError> {
        Ok(self.clone())
    }
}

/// Metadata stored in a local JSON file
#[derive(Debug, Clone)]
pub struct FileMetadataSource {
    path: PathBuf,
}

impl FileMetadataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetadataSource for FileMetadataSource {
    async fn load(&self) -> Result<DeploymentMetadata, DappError> {
        debug!(target: "artist_token", path = %self.path.display(), "reading deployment metadata");
        let content = tokio::fs::read(&self.path).await.map_err(|e| {
            DappError::Metadata(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        DeploymentMetadata::from_slice(&content)
    }
}
