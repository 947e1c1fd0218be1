//! The mounted mode: its runtime, subscriptions and map.
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{broadcast, oneshot};

use game_core::GameMode;
use runtime::{Event as RuntimeEvent, Runtime, RuntimeHandle, Topic};

use client_frontend_core::{
    SessionProvider,
    config::MapConfig,
    map::{MapLayer, RegionDataset},
};

/// Map availability for the mounted mode.
pub enum MapState {
    Loading(oneshot::Receiver<Result<RegionDataset>>),
    Failed(String),
    Ready(MapLayer),
}

impl MapState {
    pub fn layer_mut(&mut self) -> Option<&mut MapLayer> {
        match self {
            MapState::Ready(layer) => Some(layer),
            _ => None,
        }
    }
}

/// Event receivers owned by the loop itself so `select!` can borrow them
/// while the session is being replaced.
pub struct Subscriptions {
    pub session: broadcast::Receiver<RuntimeEvent>,
    pub catalog: broadcast::Receiver<RuntimeEvent>,
}

/// One mode's store. Dropping it abandons the mode.
pub struct ActiveSession {
    runtime: Runtime,
    handle: RuntimeHandle,
    pub map: MapState,
}

impl ActiveSession {
    /// Open `mode`, start loading its catalog, state and map in the background.
    pub async fn mount(
        sessions: &Arc<dyn SessionProvider>,
        mode: GameMode,
    ) -> Result<(Self, Subscriptions)> {
        let runtime = sessions.open(mode).await?;
        let handle = runtime.handle();

        let mut topics = handle.subscribe_multiple(&[Topic::Session, Topic::Catalog]);
        let subscriptions = Subscriptions {
            session: topics
                .remove(&Topic::Session)
                .unwrap_or_else(|| handle.subscribe(Topic::Session)),
            catalog: topics
                .remove(&Topic::Catalog)
                .unwrap_or_else(|| handle.subscribe(Topic::Catalog)),
        };

        let activation = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = activation.activate().await {
                tracing::warn!("Activation of {} failed: {}", mode, e);
            }
        });

        let (dataset_tx, dataset_rx) = oneshot::channel();
        let loader = Arc::clone(sessions);
        tokio::spawn(async move {
            let result = loader.load_dataset(mode).await;
            // The mode may have been abandoned meanwhile.
            let _ = dataset_tx.send(result);
        });

        Ok((
            Self {
                runtime,
                handle,
                map: MapState::Loading(dataset_rx),
            },
            subscriptions,
        ))
    }

    pub fn mode(&self) -> GameMode {
        self.runtime.mode()
    }

    pub fn handle(&self) -> &RuntimeHandle {
        &self.handle
    }

    /// Mount the map once the dataset arrives. Returns whether anything changed.
    pub fn poll_dataset(&mut self, config: &MapConfig) -> bool {
        let MapState::Loading(rx) = &mut self.map else {
            return false;
        };
        self.map = match rx.try_recv() {
            Ok(Ok(dataset)) => MapState::Ready(MapLayer::mount(Arc::new(dataset), config)),
            Ok(Err(e)) => {
                tracing::warn!("Map for {} unavailable: {:#}", self.mode(), e);
                MapState::Failed(format!("{e:#}"))
            }
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => {
                MapState::Failed("map loader stopped".to_string())
            }
        };
        true
    }
}
