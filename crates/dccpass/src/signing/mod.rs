//! Manifest signing.
//!
//! Pass signing itself happens on a remote service that holds the pass type
//! certificate. This module defines the [`ManifestSigner`] seam and the HTTP
//! client that talks to that service ([`RemoteSigner`]).

pub mod client;

pub use client::{RemoteSigner, RemoteSignerConfig};

use crate::Result;
use async_trait::async_trait;

/// Produces a detached signature over manifest bytes.
///
/// The bytes handed to [`sign`](ManifestSigner::sign) are exactly the bytes
/// that end up in `manifest.json`.
#[async_trait]
pub trait ManifestSigner: Send + Sync {
    async fn sign(&self, manifest: &[u8]) -> Result<Vec<u8>>;
}
