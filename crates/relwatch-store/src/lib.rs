use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use relwatch_core::{AppId, StatusRecord};
use tracing::{debug, warn};

/// Full contents of the status file.
pub type StatusMap = BTreeMap<AppId, StatusRecord>;

/// Last observed status per application, backed by one JSON file.
///
/// Every call reads (and `save` rewrites) the whole file. Not safe under
/// concurrent writers; at most one run may be active at a time.
#[derive(Debug, Clone)]
pub struct StatusStore {
    path: PathBuf,
}

impl StatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole mapping.
    ///
    /// A missing file is created as `{}`. An unreadable or malformed file is
    /// logged and treated as empty; this never fails.
    pub fn load(&self) -> StatusMap {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "status file missing, initializing");
            if let Err(e) = write_map(&self.path, &StatusMap::new()) {
                warn!(path = %self.path.display(), error = %e, "failed to initialize status file");
            }
            return StatusMap::new();
        }
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "status file unreadable, starting empty");
                return StatusMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "status file malformed, starting empty");
                StatusMap::new()
            }
        }
    }

    /// Stored record for one application, if any.
    pub fn get(&self, app_id: &str) -> Option<StatusRecord> {
        self.load().remove(app_id)
    }

    /// Overwrite one entry: reload, set, rewrite the whole file.
    pub fn save(&self, app_id: &str, record: &StatusRecord) -> anyhow::Result<()> {
        let mut map = self.load();
        map.insert(app_id.to_string(), record.clone());
        write_map(&self.path, &map)
    }

    /// True when there is no stored record, or state or version differ.
    pub fn has_changed(&self, app_id: &str, candidate: &StatusRecord) -> bool {
        match self.get(app_id) {
            Some(prior) => prior.differs_from(candidate),
            None => true,
        }
    }
}

fn write_map(path: &Path, map: &StatusMap) -> anyhow::Result<()> {
    let data = serde_json::to_string_pretty(map)?;
    write_atomic(path, data.as_bytes())
}

/// Atomic write: write to temp file in same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}
