//! Pass document assembly.

use super::document::{Barcode, FieldGroups, PassDocument};
use super::fields::{FieldBuilder, VACCINATION_VALIDITY_DAYS};
use crate::certificate::{Certificate, CertificateDetails};
use crate::date;
use crate::i18n::Translate;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Name shown as logo text, organization and description.
pub const PASS_NAME: &str = "COVID Pass";

pub const FORMAT_VERSION: u32 = 1;
pub const LABEL_COLOR: &str = "rgb(77,149,84)";
pub const FOREGROUND_COLOR: &str = "rgb(0,0,0)";
pub const BACKGROUND_COLOR: &str = "rgb(246,244,240)";

/// Random characters appended to the UVCI to form the serial number.
const SERIAL_SUFFIX_LEN: usize = 8;

/// Identifiers registered for the signing certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassIdentifiers {
    pub pass_type_identifier: String,
    pub team_identifier: String,
}

impl PassIdentifiers {
    pub fn new(pass_type_identifier: impl Into<String>, team_identifier: impl Into<String>) -> Self {
        Self {
            pass_type_identifier: pass_type_identifier.into(),
            team_identifier: team_identifier.into(),
        }
    }
}

/// Expiration of the pass, if the certificate kind has one.
///
/// Vaccinations expire a fixed number of days after the date of vaccination,
/// recoveries at their valid-until date, and tests carry no expiration.
pub fn expiration_date(cert: &Certificate) -> Option<String> {
    match &cert.details {
        CertificateDetails::Vaccination(v) => {
            date::expiration_after(&v.date_of_vaccination, VACCINATION_VALIDITY_DAYS)
        }
        CertificateDetails::Recovery(r) => date::as_expiration(&r.valid_until_date),
        CertificateDetails::Test(_) => None,
    }
}

/// Serial number: UVCI followed by random alphanumerics.
pub fn serial_number(uvci: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SERIAL_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{uvci}{suffix}")
}

/// Assemble the pass document with a freshly generated serial number.
pub fn assemble<T: Translate + ?Sized>(
    cert: &Certificate,
    identifiers: &PassIdentifiers,
    translator: &T,
) -> PassDocument {
    assemble_with_serial(cert, identifiers, translator, serial_number(&cert.uvci))
}

/// Assemble the pass document with a caller-chosen serial number.
pub fn assemble_with_serial<T: Translate + ?Sized>(
    cert: &Certificate,
    identifiers: &PassIdentifiers,
    translator: &T,
    serial_number: String,
) -> PassDocument {
    let fields = FieldBuilder::new(translator);
    let variant = fields.secondary_and_auxiliary(cert);

    let expiration_date = expiration_date(cert);
    if expiration_date.is_none() {
        log::debug!("no expiration date for {} certificate", cert.kind());
    }

    // Scanned string, verbatim.
    let qr = Barcode::qr(cert.message.clone());

    PassDocument {
        pass_type_identifier: identifiers.pass_type_identifier.clone(),
        team_identifier: identifiers.team_identifier.clone(),
        sharing_prohibited: true,
        voided: false,
        format_version: FORMAT_VERSION,
        logo_text: PASS_NAME.to_string(),
        organization_name: PASS_NAME.to_string(),
        description: PASS_NAME.to_string(),
        label_color: LABEL_COLOR.to_string(),
        foreground_color: FOREGROUND_COLOR.to_string(),
        background_color: BACKGROUND_COLOR.to_string(),
        serial_number,
        barcodes: vec![qr.clone()],
        barcode: qr,
        expiration_date,
        generic: FieldGroups {
            header_fields: vec![fields.plain_field(
                "type",
                &translator.translate(&format!("pass.certificateType.{}", cert.kind())),
                "pass.certificateType.label",
            )],
            primary_fields: vec![fields.plain_field("name", &cert.name, "pass.name")],
            secondary_fields: variant.secondary,
            auxiliary_fields: variant.auxiliary,
            back_fields: vec![
                fields.plain_field("uvci", &cert.uvci, "pass.uniqueCertificateIdentifier"),
                fields.plain_field("issuer", &cert.issuer, "pass.certificateIssuer"),
                fields.plain_field("country", &cert.country, "pass.country"),
                fields.plain_field(
                    "disclaimer",
                    &translator.translate("pass.disclaimer.value"),
                    "pass.disclaimer.label",
                ),
                fields.plain_field(
                    "credits",
                    &translator.translate("pass.credits.value"),
                    "pass.credits.label",
                ),
            ],
        },
    }
}
