//! Rate cache snapshot storage using Apache OpenDAL.

use async_trait::async_trait;
use justsplit_core::currency::{FxError, RateCacheSnapshot, RateSnapshotStore};
use justsplit_shared::StorageConfig;
use opendal::{ErrorKind, Operator, services};
use tracing::debug;

/// Snapshot store writing one JSON document to an OpenDAL backend.
pub struct OpendalSnapshotStore {
    operator: Operator,
    key: String,
}

impl OpendalSnapshotStore {
    /// Wraps an existing operator.
    #[must_use]
    pub fn new(operator: Operator, key: impl Into<String>) -> Self {
        Self {
            operator,
            key: key.into(),
        }
    }

    /// Creates a store on the local filesystem under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized.
    pub fn local_fs(root: &str, key: impl Into<String>) -> Result<Self, FxError> {
        let builder = services::Fs::default().root(root);
        let operator = Operator::new(builder)
            .map_err(|e| FxError::Storage(e.to_string()))?
            .finish();
        Ok(Self::new(operator, key))
    }

    /// Creates an in-process store; snapshots do not survive a restart.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized.
    pub fn memory(key: impl Into<String>) -> Result<Self, FxError> {
        let operator = Operator::new(services::Memory::default())
            .map_err(|e| FxError::Storage(e.to_string()))?
            .finish();
        Ok(Self::new(operator, key))
    }

    /// Creates the store described by the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized.
    pub fn from_config(config: &StorageConfig) -> Result<Self, FxError> {
        match &config.root {
            Some(root) => Self::local_fs(root, config.snapshot_key.clone()),
            None => Self::memory(config.snapshot_key.clone()),
        }
    }

    /// Object key of the snapshot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl RateSnapshotStore for OpendalSnapshotStore {
    async fn load(&self) -> Result<Option<RateCacheSnapshot>, FxError> {
        let buffer = match self.operator.read(&self.key).await {
            Ok(buffer) => buffer,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(FxError::Storage(e.to_string())),
        };

        let snapshot = serde_json::from_slice::<RateCacheSnapshot>(&buffer.to_vec())
            .map_err(|e| FxError::Storage(format!("corrupt snapshot {}: {e}", self.key)))?;
        debug!(key = %self.key, bases = snapshot.exchange_rates.len(), "Loaded rate snapshot");
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &RateCacheSnapshot) -> Result<(), FxError> {
        let bytes = serde_json::to_vec(snapshot).map_err(|e| FxError::Storage(e.to_string()))?;
        self.operator
            .write(&self.key, bytes)
            .await
            .map_err(|e| FxError::Storage(e.to_string()))?;
        debug!(key = %self.key, bases = snapshot.exchange_rates.len(), "Saved rate snapshot");
        Ok(())
    }
}
