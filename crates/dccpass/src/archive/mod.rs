//! Pass archive handling.
//!
//! This module provides functionality to:
//! - Hash archive entries into `manifest.json` ([`ManifestBuilder`])
//! - Have the manifest signed and collect the signed entries ([`build_and_sign`])
//! - Write the entries into a `.pkpass` container ([`write_zip`])
//! - Check an existing `.pkpass` against its manifest ([`verify_pass_archive`])
//!
//! # Archive Layout
//!
//! | Entry | Description |
//! |-------|-------------|
//! | `pass.json` | Pass document |
//! | `icon.png`, `icon@2x.png` | Notification icons |
//! | `logo.png`, `logo@2x.png` | Front logo |
//! | `manifest.json` | SHA-1 of every entry above |
//! | `signature` | Detached signature over `manifest.json` |

pub mod manifest;
pub mod package;
pub mod verify;

pub use manifest::ManifestBuilder;
pub use package::{write_zip, CompressionLevel};
pub use verify::verify_pass_archive;

use crate::assets::AssetBundle;
use crate::pass::PassDocument;
use crate::signing::ManifestSigner;
use crate::Result;

pub const PASS_JSON: &str = "pass.json";
pub const MANIFEST_JSON: &str = "manifest.json";
pub const SIGNATURE: &str = "signature";

/// Every entry a complete pass archive carries.
pub const REQUIRED_ENTRIES: [&str; 7] = [
    PASS_JSON,
    "icon.png",
    "icon@2x.png",
    "logo.png",
    "logo@2x.png",
    MANIFEST_JSON,
    SIGNATURE,
];

/// All entries of a signed pass, in archive order.
///
/// Only [`build_and_sign`] creates one, and only after the signer succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedArchive {
    entries: Vec<(String, Vec<u8>)>,
}

impl SignedArchive {
    pub fn entries(&self) -> &[(String, Vec<u8>)] {
        &self.entries
    }

    /// Bytes of the entry at `path`.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.as_slice())
    }

    /// Package the entries into `.pkpass` bytes.
    pub fn to_zip(&self, compression_level: CompressionLevel) -> Result<Vec<u8>> {
        write_zip(&self.entries, compression_level)
    }
}

/// Serialize the pass, hash every entry, have the manifest signed, and
/// collect the complete set of archive entries.
///
/// The manifest is serialized once; the same bytes go to the signer and into
/// `manifest.json`.
///
/// # Errors
///
/// Returns whatever the signer returns ([`Error::Network`](crate::Error::Network)
/// or [`Error::Signing`](crate::Error::Signing)); no archive is produced in
/// that case.
pub async fn build_and_sign<S: ManifestSigner + ?Sized>(
    pass: &PassDocument,
    assets: &AssetBundle,
    signer: &S,
) -> Result<SignedArchive> {
    let mut entries: Vec<(String, Vec<u8>)> = Vec::with_capacity(REQUIRED_ENTRIES.len());
    entries.push((PASS_JSON.to_string(), serde_json::to_vec(pass)?));
    for (name, data) in assets.entries() {
        entries.push((name.to_string(), data.to_vec()));
    }

    let mut manifest = ManifestBuilder::new();
    for (path, data) in &entries {
        manifest.add_file(path.as_str(), data)?;
    }
    let manifest_bytes = manifest.build()?;

    let signature = match signer.sign(&manifest_bytes).await {
        Ok(signature) => signature,
        Err(e) => {
            log::error!("manifest signing failed: {e}");
            return Err(e);
        }
    };

    entries.push((MANIFEST_JSON.to_string(), manifest_bytes));
    entries.push((SIGNATURE.to_string(), signature));

    Ok(SignedArchive { entries })
}
