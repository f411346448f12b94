//! Manifest generation for pass archives
//!
//! Generates `manifest.json`, the object the remote signer signs: a map from
//! every archive entry to the SHA-1 of its contents.

use crate::{Error, Result};
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// Archive entries that are never listed in the manifest.
pub const UNHASHED_ENTRIES: [&str; 2] = ["manifest.json", "signature"];

/// Builder for generating `manifest.json`
#[derive(Debug, Default, Clone)]
pub struct ManifestBuilder {
    /// Entry path to lowercase hex SHA-1. Sorted, so serialization is stable.
    files: BTreeMap<String, String>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hex-encoded SHA-1 of `data`
    pub fn hash_data(data: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    /// Hash and record an archive entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArchive`] for `manifest.json`, `signature`, or a
    /// path that was already added.
    pub fn add_file(&mut self, path: impl Into<String>, data: &[u8]) -> Result<&mut Self> {
        let path = path.into();

        if UNHASHED_ENTRIES.contains(&path.as_str()) {
            return Err(Error::InvalidArchive(format!(
                "{path} cannot be listed in its own manifest"
            )));
        }
        if self.files.contains_key(&path) {
            return Err(Error::InvalidArchive(format!("duplicate entry {path}")));
        }

        let hash = Self::hash_data(data);
        log::debug!("manifest {path} -> {hash}");
        self.files.insert(path, hash);
        Ok(self)
    }

    /// Serialize the manifest as compact JSON.
    ///
    /// These exact bytes are both sent for signing and stored as
    /// `manifest.json`; callers must not re-serialize.
    pub fn build(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.files)?)
    }

    /// Get the raw files map for inspection
    pub fn files(&self) -> impl Iterator<Item = (&String, &String)> {
        self.files.iter()
    }

    /// Get the number of files that will be included
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
