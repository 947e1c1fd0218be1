//! Loads the static map dataset for a mode from disk or over HTTP.
use client_frontend_core::map::{DatasetError, DatasetLayout, RegionDataset};
use game_core::GameMode;

use crate::config::DatasetSource;

#[derive(Clone, Debug)]
pub struct DatasetLoader {
    source: DatasetSource,
    http: reqwest::Client,
}

impl DatasetLoader {
    pub fn new(source: DatasetSource, http: reqwest::Client) -> Self {
        Self { source, http }
    }

    pub async fn load(&self, mode: GameMode) -> Result<RegionDataset, DatasetError> {
        let layout = DatasetLayout::for_mode(mode);
        let raw = match &self.source {
            DatasetSource::Directory(dir) => {
                let path = dir.join(layout.file_name);
                tracing::debug!(path = %path.display(), "reading map dataset");
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| DatasetError::Io { path, source })?
            }
            DatasetSource::Url(base) => {
                let url = format!("{}/{}", base.trim_end_matches('/'), layout.file_name);
                tracing::debug!(%url, "downloading map dataset");
                self.fetch(&url).await?
            }
        };

        // Country polygons run to tens of megabytes.
        tokio::task::spawn_blocking(move || RegionDataset::from_geojson(mode, &raw))
            .await
            .map_err(|error| DatasetError::Fetch {
                url: layout.file_name.to_string(),
                message: error.to_string(),
            })?
    }

    async fn fetch(&self, url: &str) -> Result<String, DatasetError> {
        let failure = |message: String| DatasetError::Fetch {
            url: url.to_string(),
            message,
        };
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|error| failure(error.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP {status}")));
        }
        response.text().await.map_err(|error| failure(error.to_string()))
    }
}
