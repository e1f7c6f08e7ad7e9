use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::WeightsError;

/// Name-to-value weight mapping as it is persisted.
pub type WeightMap = BTreeMap<String, f64>;

/// Where an adaptive agent keeps its learned weights between runs.
///
/// The store is owned by exactly one agent. Stores do no cross-process
/// locking, so two agents pointed at the same file race and the last save
/// wins.
pub trait WeightStore: Send {
    /// Read the stored mapping. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<WeightMap>, WeightsError>;

    /// Replace the stored mapping.
    fn save(&mut self, weights: &WeightMap) -> Result<(), WeightsError>;

    /// Short human-readable location, used in log lines.
    fn describe(&self) -> String;
}

/// JSON file store. The file holds a single flat object of
/// `"feature_name": number` pairs.
#[derive(Debug, Clone)]
pub struct FileWeightStore {
    path: PathBuf,
}

impl FileWeightStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileWeightStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl WeightStore for FileWeightStore {
    fn load(&self) -> Result<Option<WeightMap>, WeightsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(WeightsError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| WeightsError::Parse {
                path: self.path.clone(),
                source: e,
            })?;
        let object = value
            .as_object()
            .ok_or_else(|| WeightsError::NotAnObject(self.path.clone()))?;

        // Non-numeric entries are skipped rather than rejected.
        let map = object
            .iter()
            .filter_map(|(key, v)| v.as_f64().map(|n| (key.clone(), n)))
            .collect();
        Ok(Some(map))
    }

    fn save(&mut self, weights: &WeightMap) -> Result<(), WeightsError> {
        let write_err = |path: &Path, source| WeightsError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_err(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(weights)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| write_err(&tmp, e))?;
        // Atomic rename
        fs::rename(&tmp, &self.path).map_err(|e| write_err(&self.path, e))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// and inspect what the agent saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryWeightStore {
    slot: Arc<Mutex<Option<WeightMap>>>,
}

impl MemoryWeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: WeightMap) -> Self {
        MemoryWeightStore {
            slot: Arc::new(Mutex::new(Some(weights))),
        }
    }

    /// Snapshot of the last saved mapping.
    pub fn saved(&self) -> Option<WeightMap> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<WeightMap>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WeightStore for MemoryWeightStore {
    fn load(&self) -> Result<Option<WeightMap>, WeightsError> {
        Ok(self.lock().clone())
    }

    fn save(&mut self, weights: &WeightMap) -> Result<(), WeightsError> {
        *self.lock() = Some(weights.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Store that never persists. Loads find nothing and saves are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWeightStore;

impl WeightStore for NullWeightStore {
    fn load(&self) -> Result<Option<WeightMap>, WeightsError> {
        Ok(None)
    }

    fn save(&mut self, _weights: &WeightMap) -> Result<(), WeightsError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "none".to_string()
    }
}

/// Store whose saves always fail, for exercising error paths.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FailingWeightStore;

#[cfg(test)]
impl WeightStore for FailingWeightStore {
    fn load(&self) -> Result<Option<WeightMap>, WeightsError> {
        Ok(None)
    }

    fn save(&mut self, _weights: &WeightMap) -> Result<(), WeightsError> {
        Err(WeightsError::Write {
            path: PathBuf::from("read-only/agent_weights.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}
