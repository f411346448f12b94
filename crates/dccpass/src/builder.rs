//! PassBuilder API
//!
//! Provides a builder pattern interface for turning a decoded certificate
//! payload into a signed `.pkpass` archive.

use crate::archive::{self, CompressionLevel, SignedArchive};
use crate::assets::AssetBundle;
use crate::certificate::{self, RawPayload};
use crate::i18n::{MessageCatalog, Translate};
use crate::pass::{self, PassDocument, PassIdentifiers};
use crate::signing::ManifestSigner;
use crate::value_sets::{ValueSetSource, ValueSets};
use crate::{Error, Result};

/// Wallet pass creation with builder pattern API.
///
/// # Example
///
/// ```ignore
/// use dccpass::{PassBuilder, PassIdentifiers, RemoteSigner, RemoteSignerConfig};
///
/// let signer = RemoteSigner::new(RemoteSignerConfig::new("https://pass.example.com"))?;
/// let pkpass = PassBuilder::new(PassIdentifiers::new("pass.com.example.covid", "ABCDE12345"))
///     .assets(AssetBundle::from_dir("assets")?)
///     .compression_level(9)
///     .create_pass(&payload, &value_set_source, &signer)
///     .await?;
/// ```
pub struct PassBuilder {
    identifiers: PassIdentifiers,
    translator: Box<dyn Translate + Send + Sync>,
    assets: Option<AssetBundle>,
    compression_level: CompressionLevel,
}

impl PassBuilder {
    /// Create a new builder with English labels and default compression.
    pub fn new(identifiers: PassIdentifiers) -> Self {
        Self {
            identifiers,
            translator: Box::new(MessageCatalog::english()),
            assets: None,
            compression_level: CompressionLevel::DEFAULT,
        }
    }

    /// Set the translator used for every pass label.
    pub fn translator(mut self, translator: impl Translate + Send + Sync + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Set the icon and logo images.
    pub fn assets(mut self, assets: AssetBundle) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Set ZIP compression level for the archive (0-9).
    ///
    /// 0 = no compression (fastest), 9 = maximum compression (smallest).
    /// Default is 6 (balanced).
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = CompressionLevel::new(level);
        self
    }

    /// Validate the builder configuration.
    ///
    /// Returns an error if identifiers are empty or no assets are set.
    pub fn validate(&self) -> Result<()> {
        if self.identifiers.pass_type_identifier.is_empty()
            || self.identifiers.team_identifier.is_empty()
        {
            return Err(Error::Config(
                "Pass type and team identifiers must be set".into(),
            ));
        }
        if self.assets.is_none() {
            return Err(Error::Asset("No icon/logo assets configured".into()));
        }
        Ok(())
    }

    /// Decode the payload and assemble the pass document, without signing.
    ///
    /// # Errors
    ///
    /// Returns any [`certificate::decode`] error.
    pub fn assemble(
        &self,
        payload: &RawPayload,
        value_sets: &ValueSets,
    ) -> Result<PassDocument> {
        let cert = certificate::decode(payload, value_sets)?;
        log::info!("decoded {} certificate {}", cert.kind(), cert.uvci);
        Ok(pass::assemble(&cert, &self.identifiers, self.translator.as_ref()))
    }

    /// Run the whole flow and return the signed entries.
    ///
    /// Fetches value sets once, decodes, assembles the pass, and has the
    /// manifest signed. Any failure is logged and returned; nothing is retried.
    pub async fn build<V, S>(
        &self,
        payload: &RawPayload,
        value_sets: &V,
        signer: &S,
    ) -> Result<SignedArchive>
    where
        V: ValueSetSource + ?Sized,
        S: ManifestSigner + ?Sized,
    {
        self.validate()?;
        let assets = self
            .assets
            .as_ref()
            .ok_or_else(|| Error::Asset("No icon/logo assets configured".into()))?;

        let sets = value_sets.fetch().await.map_err(|e| {
            log::error!("fetching value sets failed: {e}");
            e
        })?;

        let pass = self.assemble(payload, &sets).map_err(|e| {
            log::error!("extracting payload failed: {e}");
            e
        })?;

        archive::build_and_sign(&pass, assets, signer).await
    }

    /// Run the whole flow and return `.pkpass` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The builder is not fully configured
    /// - Value sets cannot be fetched
    /// - The payload fails to decode or validate
    /// - The signing service fails or answers with a non-200 status
    /// - The archive cannot be written
    pub async fn create_pass<V, S>(
        &self,
        payload: &RawPayload,
        value_sets: &V,
        signer: &S,
    ) -> Result<Vec<u8>>
    where
        V: ValueSetSource + ?Sized,
        S: ManifestSigner + ?Sized,
    {
        let signed = self.build(payload, value_sets, signer).await?;
        signed.to_zip(self.compression_level)
    }
}
