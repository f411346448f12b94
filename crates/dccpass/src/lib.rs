//! Turns decoded EU Digital COVID Certificates into signed wallet passes.
//!
//! The flow is: fetch [`ValueSets`], [`certificate::decode`] the claims,
//! [`pass::assemble`] the `pass.json` document, hash every entry into a
//! manifest, have it signed by a [`ManifestSigner`], and package a `.pkpass`.
//! [`PassBuilder`] drives all of it.

pub mod archive;
pub mod assets;
pub mod builder;
pub mod certificate;
pub mod config;
pub mod date;
pub mod error;
pub mod i18n;
pub mod pass;
pub mod signing;
pub mod value_sets;

pub use archive::{build_and_sign, verify_pass_archive, CompressionLevel, ManifestBuilder, SignedArchive};
pub use assets::AssetBundle;
pub use builder::PassBuilder;
pub use certificate::{Certificate, CertificateDetails, CertificateKind, RawPayload};
pub use config::PassConfig;
pub use error::Error;
pub use i18n::{MessageCatalog, Translate};
pub use pass::{PassDocument, PassIdentifiers};
pub use signing::{ManifestSigner, RemoteSigner, RemoteSignerConfig};
pub use value_sets::{DirValueSetSource, HttpValueSetSource, ValueSetSource, ValueSetTable, ValueSets};

pub type Result<T> = std::result::Result<T, Error>;
