//! Flat-file portfolio store: one JSON object mapping identifier → record.
//!
//! Identifiers keep the order they were first saved in. Every write rewrites
//! the whole file. Writers inside this process are serialized by `write_lock`;
//! separate processes sharing the file are not, and the last full-file write wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::portfolio::models::StoredPortfolio;

/// Identifier → record, in file order. Records stay as JSON until one is read.
pub type PortfolioMap = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid portfolio file: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: record {id} is malformed: {source}")]
    Record {
        path: PathBuf,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize portfolios: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Clone)]
pub struct PortfolioStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl PortfolioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file. A missing file is an empty store.
    pub async fn load(&self) -> Result<PortfolioMap, StoreError> {
        let bytes = match tokio::fs::read(self.path.as_path()).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PortfolioMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: self.path.to_path_buf(),
            source,
        })
    }

    /// Serializes `portfolios` and replaces the file in full. The new content is
    /// written beside the file and renamed over it, so readers never see a torn write.
    pub async fn save(&self, portfolios: &PortfolioMap) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(portfolios).map_err(StoreError::Serialize)?;

        let mut staging = self.path.as_os_str().to_owned();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        tokio::fs::write(&staging, json)
            .await
            .map_err(|e| self.io_error(e))?;
        if let Err(e) = tokio::fs::rename(&staging, self.path.as_path()).await {
            if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
                warn!(path = %staging.display(), "Failed to remove staging file: {cleanup}");
            }
            return Err(self.io_error(e));
        }

        debug!(path = %self.path.display(), count = portfolios.len(), "Portfolio file written");
        Ok(())
    }

    /// Load → insert → save under the writer lock. An existing record with the
    /// same identifier is replaced.
    pub async fn insert(&self, id: String, record: StoredPortfolio) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let record = serde_json::to_value(record).map_err(StoreError::Serialize)?;
        let mut portfolios = self.load().await?;
        if portfolios.insert(id.clone(), record).is_some() {
            warn!(%id, "Portfolio identifier reused; previous record replaced");
        }
        self.save(&portfolios).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<StoredPortfolio>, StoreError> {
        let Some(value) = self.load().await?.remove(id) else {
            return Ok(None);
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StoreError::Record {
                path: self.path.to_path_buf(),
                id: id.to_string(),
                source,
            })
    }

    pub async fn ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.load().await?.into_iter().map(|(id, _)| id).collect())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.to_path_buf(),
            source,
        }
    }
}
