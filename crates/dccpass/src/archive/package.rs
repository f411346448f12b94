//! Pass archive (ZIP) creation.
//!
//! Writes named entries into an in-memory `.pkpass` container.
//!
//! For the reverse operation, see the [`verify`](super::verify) module.
//!
//! # Examples
//!
//! ```
//! use dccpass::archive::{write_zip, CompressionLevel};
//!
//! let entries = vec![("pass.json".to_string(), b"{}".to_vec())];
//! let bytes = write_zip(&entries, CompressionLevel::DEFAULT)?;
//! assert_eq!(&bytes[0..2], b"PK");
//! # Ok::<(), dccpass::Error>(())
//! ```

use crate::{Error, Result};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// ZIP compression level for pass archives.
///
/// Use the provided constants for common use cases, or [`CompressionLevel::new`]
/// for custom levels.
///
/// # Examples
///
/// ```
/// use dccpass::archive::CompressionLevel;
///
/// let fast = CompressionLevel::NONE;
/// let balanced = CompressionLevel::DEFAULT;
///
/// // Clamped to 0-9
/// assert_eq!(CompressionLevel::new(12).level(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// No compression (level 0).
    pub const NONE: CompressionLevel = CompressionLevel(0);

    /// Default compression (level 6).
    pub const DEFAULT: CompressionLevel = CompressionLevel(6);

    /// Maximum compression (level 9).
    pub const MAX: CompressionLevel = CompressionLevel(9);

    /// Creates a compression level from 0-9.
    ///
    /// Values greater than 9 are clamped to 9.
    #[must_use]
    pub fn new(level: u32) -> Self {
        CompressionLevel(level.min(9))
    }

    /// Returns the compression level value (0-9).
    #[must_use]
    pub fn level(&self) -> u32 {
        self.0
    }

    fn options(self) -> SimpleFileOptions {
        if self.0 == 0 {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(self.0)))
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for CompressionLevel {
    fn from(level: u32) -> Self {
        CompressionLevel::new(level)
    }
}

/// Write `(path, bytes)` entries into a ZIP archive held in memory.
///
/// Entries are written flat, in the given order, with no directory records.
///
/// # Errors
///
/// Returns [`Error::Zip`] if the archive cannot be written, or
/// [`Error::InvalidArchive`] if a path repeats.
pub fn write_zip(entries: &[(String, Vec<u8>)], compression_level: CompressionLevel) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = compression_level.options().unix_permissions(0o644);

    for (i, (path, data)) in entries.iter().enumerate() {
        if entries[..i].iter().any(|(p, _)| p == path) {
            return Err(Error::InvalidArchive(format!("duplicate entry {path}")));
        }
        zip.start_file(path.as_str(), options).map_err(Error::Zip)?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish().map_err(Error::Zip)?;
    Ok(cursor.into_inner())
}
