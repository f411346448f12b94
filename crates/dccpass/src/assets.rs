//! Fixed image assets bundled into every pass.

use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Archive names of the four images, in archive order.
pub const ASSET_NAMES: [&str; 4] = ["icon.png", "icon@2x.png", "logo.png", "logo@2x.png"];

/// Icon and logo images at 1x and 2x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBundle {
    pub icon: Vec<u8>,
    pub icon_2x: Vec<u8>,
    pub logo: Vec<u8>,
    pub logo_2x: Vec<u8>,
}

impl AssetBundle {
    pub fn new(icon: Vec<u8>, icon_2x: Vec<u8>, logo: Vec<u8>, logo_2x: Vec<u8>) -> Self {
        Self {
            icon,
            icon_2x,
            logo,
            logo_2x,
        }
    }

    /// Load `icon.png`, `icon@2x.png`, `logo.png` and `logo@2x.png` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Asset`] if a file is missing or empty.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| -> Result<Vec<u8>> {
            let path = dir.join(name);
            let data = fs::read(&path)
                .map_err(|e| Error::Asset(format!("Failed to read {}: {}", path.display(), e)))?;
            if data.is_empty() {
                return Err(Error::Asset(format!("{} is empty", path.display())));
            }
            Ok(data)
        };

        Ok(Self {
            icon: read(ASSET_NAMES[0])?,
            icon_2x: read(ASSET_NAMES[1])?,
            logo: read(ASSET_NAMES[2])?,
            logo_2x: read(ASSET_NAMES[3])?,
        })
    }

    /// `(archive name, bytes)` pairs in archive order.
    pub fn entries(&self) -> [(&'static str, &[u8]); 4] {
        [
            (ASSET_NAMES[0], self.icon.as_slice()),
            (ASSET_NAMES[1], self.icon_2x.as_slice()),
            (ASSET_NAMES[2], self.logo.as_slice()),
            (ASSET_NAMES[3], self.logo_2x.as_slice()),
        ]
    }
}
