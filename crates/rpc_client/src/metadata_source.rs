use artist_token_config::MetadataLocation;
use artist_token_core::{DappError, DeploymentMetadata, FileMetadataSource, MetadataSource};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Metadata served over HTTP, e.g. next to the front end's static files
#[derive(Debug, Clone)]
pub struct HttpMetadataSource {
    http_client: Client,
    url: Url,
}

impl HttpMetadataSource {
    pub fn new(url: Url) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http_client: Client, url: Url) -> Self {
        Self { http_client, url }
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn load(&self) -> Result<DeploymentMetadata, DappError> {
        debug!(target: "artist_token", url = %self.url, "fetching deployment metadata");
        let response = self
            .http_client
            .get(self.url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| DappError::Transport(format!("failed to fetch {}: {}", self.url, e)))?;
        let content = response
            .bytes()
            .await
            .map_err(|e| DappError::Transport(format!("failed to read {}: {}", self.url, e)))?;
        DeploymentMetadata::from_slice(&content)
    }
}

/// Builds the metadata source for a configured location.
pub fn metadata_source(location: MetadataLocation) -> Arc<dyn MetadataSource> {
    match location {
        MetadataLocation::File(path) => Arc::new(FileMetadataSource::new(path)),
        MetadataLocation::Http(url) => Arc::new(HttpMetadataSource::new(url)),
    }
}
