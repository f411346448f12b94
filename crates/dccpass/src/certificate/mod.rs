//! Normalized Digital COVID Certificate records.
//!
//! This module provides:
//! - [`RawPayload`], the upstream request body (`raw` QR string + decoded claims)
//! - [`Certificate`], the strongly-typed record produced by [`decode`]
//! - [`CertificateDetails`], one variant per certificate kind
//!
//! # Claims layout
//!
//! The DCC lives under CWT claim `-260`, key `1`:
//!
//! | Key | Description |
//! |-----|-------------|
//! | `nam.gn` / `nam.fnt` | Given name / standardized family name |
//! | `dob` | Date of birth (full or partial) |
//! | `v` | Vaccination entries |
//! | `t` | Test entries |
//! | `r` | Recovery entries |
//!
//! Exactly one of `v`, `t` and `r` may be present. Only the first entry of
//! that list is read.
//!
//! # Examples
//!
//! ```
//! use dccpass::{certificate, RawPayload, ValueSets, ValueSetTable};
//! use serde_json::json;
//!
//! let payload = RawPayload {
//!     raw: Some("HC1:6BFOXN...".into()),
//!     decoded: Some(json!({ "-260": { "1": {
//!         "nam": { "gn": "Erika", "fnt": "MUSTERMANN" },
//!         "dob": "1964-08-12",
//!         "r": [{ "ci": "URN:UVCI:01DE/5CWLU12RNOB9RXSEOP6FG8#W",
//!                 "is": "Robert Koch-Institut", "co": "DE",
//!                 "fr": "2021-01-10", "df": "2021-05-29", "du": "2021-06-15" }]
//!     }}})),
//! };
//! let value_sets = ValueSets {
//!     country_codes: ValueSetTable::from_pairs([("DE", "Germany")]),
//!     ..Default::default()
//! };
//!
//! let cert = certificate::decode(&payload, &value_sets)?;
//! assert_eq!(cert.name, "MUSTERMANN, Erika");
//! # Ok::<(), dccpass::Error>(())
//! ```

pub mod decode;

pub use decode::decode;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream request body: the scanned certificate string and its decoded claims.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawPayload {
    /// Original certificate string exactly as scanned (`HC1:...`).
    pub raw: Option<String>,
    /// Decoded CWT claims map.
    pub decoded: Option<serde_json::Value>,
}

/// Certificate kind, derived from the `v` / `t` / `r` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateKind {
    Vaccination,
    Test,
    Recovery,
}

impl CertificateKind {
    /// Claims key that marks this kind.
    pub fn marker(self) -> &'static str {
        match self {
            CertificateKind::Vaccination => "v",
            CertificateKind::Test => "t",
            CertificateKind::Recovery => "r",
        }
    }

    /// Lowercase name, used to build translation keys.
    pub fn as_str(self) -> &'static str {
        match self {
            CertificateKind::Vaccination => "vaccination",
            CertificateKind::Test => "test",
            CertificateKind::Recovery => "recovery",
        }
    }
}

impl fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded and validated certificate.
///
/// Every coded value has already been resolved to its display string and
/// every date normalized; nothing here is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// `"<family>, <given>"`.
    pub name: String,
    pub date_of_birth: String,
    /// Unique certificate identifier (UVCI).
    pub uvci: String,
    pub issuer: String,
    /// Country display name.
    pub country: String,
    /// Original scanned certificate string; only ever used as barcode content.
    pub message: String,
    pub details: CertificateDetails,
}

impl Certificate {
    pub fn kind(&self) -> CertificateKind {
        self.details.kind()
    }
}

/// Kind-specific part of a [`Certificate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateDetails {
    Vaccination(VaccinationDetails),
    Test(TestDetails),
    Recovery(RecoveryDetails),
}

impl CertificateDetails {
    pub fn kind(&self) -> CertificateKind {
        match self {
            CertificateDetails::Vaccination(_) => CertificateKind::Vaccination,
            CertificateDetails::Test(_) => CertificateKind::Test,
            CertificateDetails::Recovery(_) => CertificateKind::Recovery,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccinationDetails {
    pub dose_number: String,
    pub total_doses: String,
    pub date_of_vaccination: String,
    /// Medical product code as it appeared in the claims (`mp`).
    pub medical_product_key: String,
    pub vaccine_name: String,
    pub manufacturer: String,
}

impl VaccinationDetails {
    /// Dose progress, e.g. `"2/2"`.
    pub fn dose(&self) -> String {
        format!("{}/{}", self.dose_number, self.total_doses)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDetails {
    pub test_type: String,
    pub test_result: String,
    pub testing_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryDetails {
    pub positive_tested_date: String,
    pub valid_from_date: String,
    pub valid_until_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_markers() {
        assert_eq!(CertificateKind::Vaccination.marker(), "v");
        assert_eq!(CertificateKind::Test.marker(), "t");
        assert_eq!(CertificateKind::Recovery.marker(), "r");
        assert_eq!(CertificateKind::Recovery.to_string(), "recovery");
    }

    #[test]
    fn test_dose_rendering() {
        let details = VaccinationDetails {
            dose_number: "1".into(),
            total_doses: "2".into(),
            date_of_vaccination: "2021-05-01T12:00:00Z".into(),
            medical_product_key: "EU/1/20/1528".into(),
            vaccine_name: "Comirnaty".into(),
            manufacturer: "Biontech Manufacturing GmbH".into(),
        };
        assert_eq!(details.dose(), "1/2");
    }

    #[test]
    fn test_raw_payload_deserializes_with_missing_parts() {
        let payload: RawPayload = serde_json::from_str(r#"{"raw": "HC1:abc"}"#).unwrap();
        assert_eq!(payload.raw.as_deref(), Some("HC1:abc"));
        assert!(payload.decoded.is_none());
    }
}
