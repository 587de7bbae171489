//! Update registry: directory scanning and current-update selection.

use anyhow::{Context, Result};
use ota_common::{Channel, UpdateFile};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Scans a directory for update artifacts and tracks the current one.
///
/// The cache grows with every distinct filename ever seen; entries whose
/// backing files disappear are never evicted and keep competing for
/// `current`. Callers serialize access through one lock (see
/// [`crate::server::AppState`]).
#[derive(Debug)]
pub struct UpdateRegistry {
    directory: PathBuf,
    channel: Channel,
    updates: HashMap<String, Arc<UpdateFile>>,
    current: Option<Arc<UpdateFile>>,
}

impl UpdateRegistry {
    pub fn new(directory: impl Into<PathBuf>, channel: Channel) -> Self {
        Self {
            directory: directory.into(),
            channel,
            updates: HashMap::new(),
            current: None,
        }
    }

    /// Construct and run the startup scan.
    ///
    /// A directory with zero matching artifacts is a configuration error,
    /// not a runtime condition to serve around.
    pub async fn bootstrap(directory: impl Into<PathBuf>, channel: Channel) -> Result<Self> {
        let mut registry = Self::new(directory, channel);
        registry.scan().await?;
        anyhow::ensure!(
            registry.current.is_some(),
            "no updates found in {}",
            registry.directory.display()
        );
        Ok(registry)
    }

    /// Rescan the directory and recompute the current update.
    ///
    /// Stat fields (mtime, size) are re-read for every matching file on
    /// every scan. A cached entry is kept while those fields are unchanged,
    /// so its resolved hash and metadata survive across requests; any
    /// observed change replaces the entry wholesale.
    pub async fn scan(&mut self) -> Result<()> {
        let mut entries = tokio::fs::read_dir(&self.directory)
            .await
            .with_context(|| format!("cannot read update directory {}", self.directory.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !self.channel.matches(name) {
                continue;
            }

            let update = UpdateFile::stat(&self.directory, name, self.channel).await?;
            let unchanged = self.updates.get(name).is_some_and(|known| {
                known.modified() == update.modified() && known.size() == update.size()
            });
            if !unchanged {
                debug!("scanned {} ({} bytes)", name, update.size());
                self.updates.insert(name.to_string(), Arc::new(update));
            }
        }

        // Maximum over the entire cache, not just this scan's survivors.
        // Equal mtimes resolve to the lexicographically greatest filename so
        // the winner is stable across runs and listing orders.
        self.current = self
            .updates
            .values()
            .max_by(|a, b| {
                a.modified()
                    .cmp(&b.modified())
                    .then_with(|| a.filename().cmp(b.filename()))
            })
            .cloned();

        Ok(())
    }

    /// The update with the greatest modification time seen so far.
    pub fn current(&self) -> Option<Arc<UpdateFile>> {
        self.current.clone()
    }
}
