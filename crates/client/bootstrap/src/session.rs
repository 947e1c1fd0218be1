//! Opens per-mode sessions for front-ends.
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use client_frontend_core::SessionProvider;
use client_frontend_core::map::RegionDataset;
use game_core::GameMode;
use runtime::{Runtime, RuntimeConfig, UtcClock};

use crate::authority::{AuthorityFactory, HttpAuthorityFactory};
use crate::config::BootstrapConfig;
use crate::dataset::DatasetLoader;

/// [`SessionProvider`] assembling an authority and a runtime per mode.
pub struct SessionFactory {
    config: BootstrapConfig,
    authorities: Arc<dyn AuthorityFactory>,
    datasets: DatasetLoader,
}

impl SessionFactory {
    /// Factory backed by the HTTP API described in `config`.
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        let authorities = HttpAuthorityFactory::new(config.api.clone())?;
        Ok(Self::with_authorities(config, authorities))
    }

    /// Provide a custom authority factory (e.g. an in-memory one).
    pub fn with_authorities(
        config: BootstrapConfig,
        authorities: impl AuthorityFactory + 'static,
    ) -> Self {
        let datasets = DatasetLoader::new(config.dataset.clone(), reqwest::Client::new());
        Self {
            config,
            authorities: Arc::new(authorities),
            datasets,
        }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    fn runtime_config(&self, mode: GameMode) -> RuntimeConfig {
        RuntimeConfig {
            mode,
            event_buffer_size: self.config.channels.event_buffer,
            command_buffer_size: self.config.channels.command_buffer,
        }
    }
}

#[async_trait]
impl SessionProvider for SessionFactory {
    fn default_mode(&self) -> GameMode {
        self.config.mode
    }

    async fn open(&self, mode: GameMode) -> Result<Runtime> {
        let authority = self.authorities.build(mode)?;
        let runtime = Runtime::builder()
            .config(self.runtime_config(mode))
            .shared_authority(authority)
            .clock(UtcClock)
            .build()
            .await
            .with_context(|| format!("failed to start {mode} session"))?;

        tracing::info!(%mode, "session opened");
        Ok(runtime)
    }

    async fn load_dataset(&self, mode: GameMode) -> Result<RegionDataset> {
        let dataset = self
            .datasets
            .load(mode)
            .await
            .with_context(|| format!("failed to load {mode} map"))?;
        tracing::info!(%mode, regions = dataset.len(), "map dataset loaded");
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetSource;
    use game_core::{Entity, EntityId};
    use runtime::GameAuthority;
    use runtime::mock::MockAuthority;

    struct MockFactory;

    impl AuthorityFactory for MockFactory {
        fn build(&self, mode: GameMode) -> Result<Arc<dyn GameAuthority>> {
            let authority = MockAuthority::builder(mode)
                .entities(vec![Entity::new(EntityId(1), "mazowieckie")])
                .build();
            Ok(Arc::new(authority))
        }
    }

    const WOJEWODZTWA: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"nazwa": "mazowieckie"},
         "geometry": {"type": "Polygon", "coordinates": [[[19,51],[22,51],[22,53],[19,53],[19,51]]]}}
    ]}"#;

    fn factory(dir: &std::path::Path) -> SessionFactory {
        let config = BootstrapConfig {
            mode: GameMode::Wojewodztwa,
            dataset: DatasetSource::Directory(dir.to_path_buf()),
            ..BootstrapConfig::default()
        };
        SessionFactory::with_authorities(config, MockFactory)
    }

    #[tokio::test]
    async fn opens_a_session_for_the_requested_mode() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = factory(dir.path());

        let runtime = sessions.open(sessions.default_mode()).await.unwrap();
        let handle = runtime.handle();
        assert_eq!(handle.mode(), GameMode::Wojewodztwa);
        assert!(handle.activate().await.unwrap().is_reconciled());
        assert_eq!(handle.view().catalog.len(), 1);

        drop(handle);
        runtime.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn loads_dataset_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wojewodztwa-min.geojson"), WOJEWODZTWA).unwrap();
        let sessions = factory(dir.path());

        let dataset = sessions.load_dataset(GameMode::Wojewodztwa).await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.indices_named("Mazowieckie"), vec![0]);
    }

    #[tokio::test]
    async fn missing_dataset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = factory(dir.path());
        let error = sessions.load_dataset(GameMode::Powiaty).await.unwrap_err();
        assert!(error.to_string().contains("powiaty"));
    }
}
