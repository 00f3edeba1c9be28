//! Hot reload of the edge configuration file.
//!
//! Editors typically emit several modify events per save; a reload is only
//! forwarded when the effective configuration actually differs from the last
//! one delivered.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::load_effective_config;
use crate::config::schema::EdgeConfig;

/// Watches one config file and emits validated [`EdgeConfig`] generations.
pub struct ConfigWatcher {
    path: PathBuf,
    last: Arc<Mutex<Option<EdgeConfig>>>,
    updates: mpsc::UnboundedSender<EdgeConfig>,
}

impl ConfigWatcher {
    /// `current` is the configuration already in use, so an unchanged file
    /// does not trigger a reload.
    pub fn new(
        path: &Path,
        current: Option<EdgeConfig>,
    ) -> (Self, mpsc::UnboundedReceiver<EdgeConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            last: Arc::new(Mutex::new(current)),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let mut handle = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => self.reload(),
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        handle.watch(&path, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %path.display(), "Config watcher started");
        Ok(handle)
    }

    /// Load the file and forward it if it differs from the last generation.
    fn reload(&self) {
        let config = match load_effective_config(Some(&self.path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Config reload failed; keeping current configuration");
                return;
            }
        };
        if self.offer(config) {
            tracing::info!(path = %self.path.display(), "Config change detected");
        }
    }

    /// Returns whether `config` was forwarded.
    fn offer(&self, config: EdgeConfig) -> bool {
        let Ok(mut last) = self.last.lock() else {
            return false;
        };
        if last.as_ref() == Some(&config) {
            return false;
        }
        *last = Some(config.clone());
        self.updates.send(config).is_ok()
    }
}
