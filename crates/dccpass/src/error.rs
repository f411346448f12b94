//! Error types for pass creation.
//!
//! This module defines the [`enum@Error`] enum covering every way a pass
//! creation request can fail: fetching value sets, decoding the certificate
//! claims, talking to the signing service, and writing the archive.
//!
//! # See Also
//!
//! - [`crate::Result`] - Convenience type alias using this error

use thiserror::Error;

/// Error type for dccpass operations.
///
/// All public functions in this crate return [`crate::Result<T>`], which uses this error type.
/// Every variant is terminal for the request that produced it; nothing is retried.
///
/// # Examples
///
/// ```
/// use dccpass::{certificate, Error, RawPayload, ValueSets};
///
/// let payload = RawPayload::default();
/// match certificate::decode(&payload, &ValueSets::default()) {
///     Err(Error::MissingPayload(what)) => eprintln!("incomplete request: {what}"),
///     Err(e) => eprintln!("decode failed: {e}"),
///     Ok(cert) => println!("decoded {}", cert.uvci),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// A remote service could not be reached or answered with a failure status.
    ///
    /// Covers both the value-set fetch and transport failures of the signing call.
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not carry the raw certificate string or the decoded claims.
    #[error("Missing payload: no {0}")]
    MissingPayload(&'static str),

    /// A required claim is absent from the decoded certificate.
    ///
    /// The string names the claim path, e.g. `nam.gn` or `v[0].dt`.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// None of the vaccination, test or recovery markers is present.
    #[error("This certificate type is not supported")]
    UnsupportedCertificateType,

    /// More than one of the vaccination, test or recovery markers is present.
    #[error("Certificate contains more than one of v/t/r")]
    AmbiguousCertificateType,

    /// A coded value does not exist in its reference value set.
    #[error("Invalid {category} code: {code}")]
    InvalidCode {
        /// Value-set category the code was looked up in.
        category: &'static str,
        /// The offending code as it appeared in the claims.
        code: String,
    },

    /// The signing service answered, but not with HTTP 200.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required image asset is missing or empty.
    #[error("Asset error: {0}")]
    Asset(String),

    /// A pass archive does not have the expected layout or its manifest does not match.
    #[error("Invalid pass archive: {0}")]
    InvalidArchive(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP archive operation failed.
    ///
    /// Occurs while writing or re-reading a `.pkpass`. See [`crate::archive`].
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// TOML parsing failed for a configuration or locale file.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Network(error.to_string())
    }
}
