//! Pass archive validation.
//!
//! Re-opens a `.pkpass` and checks it against its own manifest. The signature
//! itself is not verified; that needs the pass type certificate chain.

use super::manifest::{ManifestBuilder, UNHASHED_ENTRIES};
use super::{MANIFEST_JSON, REQUIRED_ENTRIES};
use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Check that `data` is a pass archive whose manifest matches its entries.
///
/// # Errors
///
/// Returns [`Error::InvalidArchive`] if:
/// - The data is not a ZIP archive
/// - A required entry is missing
/// - An entry is not listed in the manifest, or a listed entry is missing
/// - A manifest hash does not match the entry contents
///
/// Returns [`Error::Zip`] or [`Error::Json`] if an entry cannot be read or
/// the manifest is not a JSON object of strings.
pub fn verify_pass_archive(data: &[u8]) -> Result<()> {
    // ZIP magic: PK\x03\x04 or PK\x05\x06 (empty)
    if data.len() < 4 || &data[0..2] != b"PK" {
        return Err(Error::InvalidArchive("not a ZIP archive".into()));
    }

    let mut archive = ZipArchive::new(Cursor::new(data)).map_err(Error::Zip)?;
    let mut contents: HashMap<String, Vec<u8>> = HashMap::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(Error::Zip)?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        contents.insert(name, buf);
    }

    for required in REQUIRED_ENTRIES {
        if !contents.contains_key(required) {
            return Err(Error::InvalidArchive(format!("missing {required}")));
        }
    }

    let manifest: BTreeMap<String, String> = serde_json::from_slice(&contents[MANIFEST_JSON])?;

    for (path, data) in &contents {
        if UNHASHED_ENTRIES.contains(&path.as_str()) {
            continue;
        }
        let expected = manifest
            .get(path)
            .ok_or_else(|| Error::InvalidArchive(format!("{path} is not in the manifest")))?;
        let actual = ManifestBuilder::hash_data(data);
        if !expected.eq_ignore_ascii_case(&actual) {
            return Err(Error::InvalidArchive(format!(
                "hash mismatch for {path}: manifest {expected}, actual {actual}"
            )));
        }
    }

    if let Some(path) = manifest.keys().find(|p| !contents.contains_key(p.as_str())) {
        return Err(Error::InvalidArchive(format!(
            "manifest lists {path}, which is not in the archive"
        )));
    }

    log::debug!("verified {} manifest entries", manifest.len());
    Ok(())
}
