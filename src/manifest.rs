//! Ordered list of the maps in a campaign.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Campaign map list. Order is the default next/previous map order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapManifest {
    entries: Vec<String>,
}

impl MapManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|e| e == path)
    }

    fn require(&self, path: &str) -> Result<usize, MapError> {
        self.position(path).ok_or_else(|| MapError::EntryNotFound {
            entry: path.to_owned(),
        })
    }

    /// Adds `path` at the end. Exact duplicates are rejected.
    pub fn append(&mut self, path: impl Into<String>) -> Result<(), MapError> {
        let path = path.into();
        if self.contains(&path) {
            return Err(MapError::Duplicate { entry: path });
        }
        self.entries.push(path);
        Ok(())
    }

    pub fn remove(&mut self, path: &str) -> Result<(), MapError> {
        let idx = self.require(path)?;
        self.entries.remove(idx);
        Ok(())
    }

    /// Moves `path` to the front, keeping the relative order of the rest.
    pub fn move_to_front(&mut self, path: &str) -> Result<(), MapError> {
        let idx = self.require(path)?;
        let entry = self.entries.remove(idx);
        self.entries.insert(0, entry);
        Ok(())
    }

    /// Entry after `path`, wrapping around.
    pub fn next_after(&self, path: &str) -> Option<&str> {
        let idx = self.position(path)?;
        self.entries
            .get((idx + 1) % self.entries.len())
            .map(String::as_str)
    }

    /// Entry before `path`, wrapping around.
    pub fn previous_before(&self, path: &str) -> Option<&str> {
        let idx = self.position(path)?;
        let len = self.entries.len();
        self.entries.get((idx + len - 1) % len).map(String::as_str)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p).map_err(|e| MapError::read(p, e))?;
        serde_json::from_str(&txt).map_err(|source| MapError::Json {
            path: p.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let p = path.as_ref();
        let txt = serde_json::to_string_pretty(self).map_err(|source| MapError::Json {
            path: p.to_path_buf(),
            source,
        })?;
        std::fs::write(p, txt).map_err(|source| MapError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %p.display(), entries = self.entries.len(), "saved manifest");
        Ok(())
    }

    /// Replaces the whole sequence with the file's content, then calls
    /// `reload` once per entry in order. Stops at the first failing reload.
    pub fn replace_from_file<F>(&mut self, path: impl AsRef<Path>, mut reload: F) -> Result<(), MapError>
    where
        F: FnMut(&str) -> Result<(), MapError>,
    {
        *self = Self::from_file(path)?;
        for entry in &self.entries {
            reload(entry)?;
        }
        Ok(())
    }

    /// Entries resolved against `base`, in order, first occurrence kept.
    pub fn packaging_paths(&self, base: &Path) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let resolved = base.join(entry);
            if !out.contains(&resolved) {
                out.push(resolved);
            }
        }
        out
    }

    /// Persists the manifest and returns the files a packaging step should bundle.
    pub fn write_for_packaging(&self, manifest_path: impl AsRef<Path>, base: &Path) -> Result<Vec<PathBuf>, MapError> {
        self.save(&manifest_path)?;
        let paths = self.packaging_paths(base);
        tracing::info!(
            manifest = %manifest_path.as_ref().display(),
            files = paths.len(),
            "manifest ready for packaging"
        );
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn manifest(entries: &[&str]) -> MapManifest {
        let mut m = MapManifest::new();
        for e in entries {
            m.append(*e).unwrap();
        }
        m
    }

    #[test]
    fn append_rejects_exact_duplicates() {
        let mut m = manifest(&["maps/town.json"]);
        let err = m.append("maps/town.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        // different spelling is a different entry
        m.append("maps/./town.json").unwrap();
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn move_to_front_then_remove_restores_order() {
        let initial = ["a.json", "b.json", "c.json", "d.json"];
        for target in initial {
            let mut m = manifest(&initial);
            m.move_to_front(target).unwrap();
            assert_eq!(m.entries()[0], target);
            m.remove(target).unwrap();
            let expected: Vec<&str> = initial.iter().copied().filter(|e| *e != target).collect();
            assert_eq!(m.entries(), expected.as_slice());
        }
    }

    #[test]
    fn missing_entries_are_not_found() {
        let mut m = manifest(&["a.json"]);
        assert_eq!(m.remove("b.json").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(m.move_to_front("b.json").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn neighbours_wrap_around() {
        let m = manifest(&["a.json", "b.json", "c.json"]);
        assert_eq!(m.next_after("c.json"), Some("a.json"));
        assert_eq!(m.previous_before("a.json"), Some("c.json"));
        assert_eq!(m.next_after("a.json"), Some("b.json"));
        assert_eq!(m.next_after("x.json"), None);
    }

    #[test]
    fn persists_as_a_flat_array() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("campaign.json");
        let m = manifest(&["maps/b.json", "maps/a.json"]);
        m.save(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!(["maps/b.json", "maps/a.json"]));
        assert_eq!(MapManifest::from_file(&path).unwrap(), m);
    }

    #[test]
    fn replace_reloads_each_entry_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("campaign.json");
        std::fs::write(&path, r#"["x.json", "y.json"]"#).unwrap();

        let mut m = manifest(&["old.json"]);
        let mut seen = Vec::new();
        m.replace_from_file(&path, |entry| {
            seen.push(entry.to_owned());
            Ok(())
        })
        .unwrap();
        assert_eq!(m.entries(), ["x.json".to_string(), "y.json".to_string()].as_slice());
        assert_eq!(seen, vec!["x.json", "y.json"]);
    }

    #[test]
    fn packaging_paths_are_resolved_and_deduplicated() {
        let m = MapManifest {
            entries: vec!["b.json".into(), "a.json".into(), "b.json".into()],
        };
        let paths = m.packaging_paths(Path::new("Adventure/Maps"));
        assert_eq!(
            paths,
            vec![PathBuf::from("Adventure/Maps/b.json"), PathBuf::from("Adventure/Maps/a.json")]
        );
    }
}
