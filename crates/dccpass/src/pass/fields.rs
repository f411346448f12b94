//! Kind-specific secondary and auxiliary pass fields.

use super::document::{DateStyle, Field, TextAlignment};
use crate::certificate::{Certificate, CertificateDetails};
use crate::date;
use crate::i18n::Translate;

/// Days a vaccination pass stays valid after the date of vaccination.
pub const VACCINATION_VALIDITY_DAYS: i64 = 270;

/// Alignment forced by field key, regardless of what the caller asks for.
/// Keys not listed use the caller's choice: right if requested, else left.
const ALIGNMENT_BY_KEY: &[(&str, TextAlignment)] = &[
    ("exp", TextAlignment::Right),
    ("dov", TextAlignment::Center),
];

/// Text alignment for a field.
pub fn alignment_for(key: &str, align_right: bool) -> TextAlignment {
    ALIGNMENT_BY_KEY
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, alignment)| *alignment)
        .unwrap_or(if align_right {
            TextAlignment::Right
        } else {
            TextAlignment::Left
        })
}

/// Secondary and auxiliary field rows for one certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFields {
    pub secondary: Vec<Field>,
    pub auxiliary: Vec<Field>,
}

/// Builds labeled fields, resolving labels through a translator.
pub struct FieldBuilder<'a, T: Translate + ?Sized> {
    translator: &'a T,
}

impl<'a, T: Translate + ?Sized> FieldBuilder<'a, T> {
    pub fn new(translator: &'a T) -> Self {
        Self { translator }
    }

    /// A text field with policy-driven alignment.
    pub fn string_field(&self, key: &str, value: &str, label_key: &str, align_right: bool) -> Field {
        Field {
            text_alignment: Some(alignment_for(key, align_right)),
            ..Field::plain(key, self.translator.translate(label_key), value)
        }
    }

    /// A date field: medium date, no time, rendered in UTC.
    pub fn date_field(&self, key: &str, value: &str, label_key: &str, align_right: bool) -> Field {
        Field {
            date_style: Some(DateStyle::Medium),
            time_style: Some(DateStyle::None),
            ignores_time_zone: Some(true),
            ..self.string_field(key, value, label_key, align_right)
        }
    }

    /// A label-only field without alignment, used for header, primary and back rows.
    pub fn plain_field(&self, key: &str, value: &str, label_key: &str) -> Field {
        Field::plain(key, self.translator.translate(label_key), value)
    }

    /// Secondary and auxiliary rows for `cert`'s kind.
    pub fn secondary_and_auxiliary(&self, cert: &Certificate) -> VariantFields {
        let dob = self.date_field("dob", &cert.date_of_birth, "pass.dateOfBirth", true);

        match &cert.details {
            CertificateDetails::Vaccination(v) => {
                let mut secondary = vec![
                    self.string_field("dose", &v.dose(), "pass.dose", false),
                    self.date_field("dov", &v.date_of_vaccination, "pass.dateOfVaccination", false),
                ];
                match date::expiration_after(&v.date_of_vaccination, VACCINATION_VALIDITY_DAYS) {
                    Some(exp) => {
                        secondary.push(self.date_field("exp", &exp, "pass.validUntil", true))
                    }
                    None => log::warn!(
                        "no expiration for vaccination dated {:?}",
                        v.date_of_vaccination
                    ),
                }
                VariantFields {
                    secondary,
                    auxiliary: vec![
                        self.string_field("vaccine", &v.vaccine_name, "pass.vaccine", false),
                        dob,
                    ],
                }
            }
            CertificateDetails::Test(t) => VariantFields {
                secondary: vec![
                    self.string_field("testType", &t.test_type, "pass.testType", false),
                    self.string_field("testResult", &t.test_result, "pass.testResult", true),
                ],
                auxiliary: vec![
                    self.date_field("testingTime", &t.testing_time, "pass.testingTime", false),
                    dob,
                ],
            },
            CertificateDetails::Recovery(r) => VariantFields {
                secondary: vec![
                    self.date_field("validFrom", &r.valid_from_date, "pass.validFrom", false),
                    self.date_field("validUntil", &r.valid_until_date, "pass.validUntil", true),
                ],
                auxiliary: vec![
                    self.date_field(
                        "firstPositiveTested",
                        &r.positive_tested_date,
                        "pass.positiveTested",
                        false,
                    ),
                    dob,
                ],
            },
        }
    }
}

/// Secondary and auxiliary rows for `cert`, labeled through `translator`.
pub fn secondary_and_auxiliary_fields<T: Translate + ?Sized>(
    cert: &Certificate,
    translator: &T,
) -> VariantFields {
    FieldBuilder::new(translator).secondary_and_auxiliary(cert)
}
