//! Claims decoding and validation.
//!
//! [`decode`] is a pure function: it either returns a fully populated
//! [`Certificate`] or the first validation error it hits.

use super::{
    Certificate, CertificateDetails, CertificateKind, RawPayload, RecoveryDetails, TestDetails,
    VaccinationDetails,
};
use crate::date::normalize_date;
use crate::value_sets::{ValueSetTable, ValueSets};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// CWT claim key holding the health certificate.
const HCERT_CLAIM: &str = "-260";
/// Key of the DCC inside the hcert claim.
const DCC_KEY: &str = "1";

type Claims = Map<String, Value>;

/// Decode and validate a raw payload against the reference value sets.
///
/// # Errors
///
/// - [`Error::MissingPayload`] if `raw` or `decoded` is absent
/// - [`Error::MissingField`] if a required claim is absent
/// - [`Error::UnsupportedCertificateType`] if none of `v`/`t`/`r` is present
/// - [`Error::AmbiguousCertificateType`] if more than one is present
/// - [`Error::InvalidCode`] if a coded value is not in its value set
pub fn decode(payload: &RawPayload, value_sets: &ValueSets) -> Result<Certificate> {
    let message = payload
        .raw
        .as_deref()
        .ok_or(Error::MissingPayload("raw payload"))?;
    let decoded = payload
        .decoded
        .as_ref()
        .ok_or(Error::MissingPayload("decoded payload"))?;

    let claims = decoded
        .get(HCERT_CLAIM)
        .and_then(|hcert| hcert.get(DCC_KEY))
        .and_then(Value::as_object)
        .ok_or_else(|| Error::MissingField(format!("{HCERT_CLAIM}.{DCC_KEY}")))?;

    let nam = claims
        .get("nam")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::MissingField("nam".into()))?;
    let given = text(nam, "gn", "nam")?;
    let family = text(nam, "fnt", "nam")?;
    let dob = text(claims, "dob", "")?;

    let kind = detect_kind(claims)?;
    let entry = first_entry(claims, kind)?;
    let path = format!("{}[0]", kind.marker());
    log::debug!("decoding {kind} certificate");

    let uvci = text(entry, "ci", &path)?;
    let issuer = text(entry, "is", &path)?;
    let country = resolve(
        &value_sets.country_codes,
        "country",
        entry,
        "co",
        &path,
    )?;

    let details = match kind {
        CertificateKind::Vaccination => {
            CertificateDetails::Vaccination(vaccination(entry, &path, value_sets)?)
        }
        CertificateKind::Test => CertificateDetails::Test(test(entry, &path, value_sets)?),
        CertificateKind::Recovery => CertificateDetails::Recovery(recovery(entry, &path)?),
    };

    Ok(Certificate {
        name: format!("{family}, {given}"),
        date_of_birth: normalize_date(&dob),
        uvci,
        issuer,
        country,
        message: message.to_string(),
        details,
    })
}

fn detect_kind(claims: &Claims) -> Result<CertificateKind> {
    let present: Vec<CertificateKind> = [
        CertificateKind::Vaccination,
        CertificateKind::Test,
        CertificateKind::Recovery,
    ]
    .into_iter()
    .filter(|kind| claims.contains_key(kind.marker()))
    .collect();

    match present.as_slice() {
        [kind] => Ok(*kind),
        [] => Err(Error::UnsupportedCertificateType),
        _ => Err(Error::AmbiguousCertificateType),
    }
}

fn first_entry(claims: &Claims, kind: CertificateKind) -> Result<&Claims> {
    claims
        .get(kind.marker())
        .and_then(Value::as_array)
        .and_then(|entries| entries.first())
        .and_then(Value::as_object)
        .ok_or_else(|| Error::MissingField(format!("{}[0]", kind.marker())))
}

fn vaccination(v: &Claims, path: &str, sets: &ValueSets) -> Result<VaccinationDetails> {
    let dose_number = text(v, "dn", path)?;
    let total_doses = text(v, "sd", path)?;
    let date_of_vaccination = normalize_date(&text(v, "dt", path)?);

    let medical_product_key = text(v, "mp", path)?;
    let vaccine_name = sets
        .medical_products
        .display(&medical_product_key)
        .ok_or_else(|| invalid("medical product", &medical_product_key))?
        .to_string();
    let manufacturer = resolve(&sets.manufacturers, "manufacturer", v, "ma", path)?;

    Ok(VaccinationDetails {
        dose_number,
        total_doses,
        date_of_vaccination,
        medical_product_key,
        vaccine_name,
        manufacturer,
    })
}

fn test(t: &Claims, path: &str, sets: &ValueSets) -> Result<TestDetails> {
    let test_type = resolve(&sets.test_types, "test type", t, "tt", path)?;
    let test_result = resolve(&sets.test_results, "test result", t, "tr", path)?;
    let testing_time = normalize_date(&text(t, "sc", path)?);

    Ok(TestDetails {
        test_type,
        test_result,
        testing_time,
    })
}

fn recovery(r: &Claims, path: &str) -> Result<RecoveryDetails> {
    Ok(RecoveryDetails {
        positive_tested_date: normalize_date(&text(r, "fr", path)?),
        valid_from_date: normalize_date(&text(r, "df", path)?),
        valid_until_date: normalize_date(&text(r, "du", path)?),
    })
}

/// Look up `key` in `table`, failing with [`Error::InvalidCode`] when unknown.
fn resolve(
    table: &ValueSetTable,
    category: &'static str,
    obj: &Claims,
    key: &str,
    path: &str,
) -> Result<String> {
    let code = text(obj, key, path)?;
    match table.display(&code) {
        Some(display) => Ok(display.to_string()),
        None => Err(invalid(category, &code)),
    }
}

fn invalid(category: &'static str, code: &str) -> Error {
    log::warn!("rejecting certificate: unknown {category} code {code:?}");
    Error::InvalidCode {
        category,
        code: code.to_string(),
    }
}

/// Read a claim as text. Strings are taken as-is and other scalars by their
/// JSON rendering, so numeric dose counts come through as `"2"`.
fn text(obj: &Claims, key: &str, path: &str) -> Result<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        _ => Err(Error::MissingField(if path.is_empty() {
            key.to_string()
        } else {
            format!("{path}.{key}")
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value_sets() -> ValueSets {
        ValueSets {
            country_codes: ValueSetTable::from_pairs([("DE", "Germany"), ("AT", "Austria")]),
            medical_products: ValueSetTable::from_pairs([("EU/1/20/1528", "Comirnaty")]),
            manufacturers: ValueSetTable::from_pairs([(
                "ORG-100030215",
                "Biontech Manufacturing GmbH",
            )]),
            test_types: ValueSetTable::from_pairs([("LP6464-4", "Nucleic acid amplification")]),
            test_results: ValueSetTable::from_pairs([("260415000", "Not detected")]),
        }
    }

    fn payload(kind: &str, entry: Value) -> RawPayload {
        let mut dcc = json!({
            "ver": "1.3.0",
            "nam": { "fn": "Mustermann", "gn": "Erika", "fnt": "MUSTERMANN", "gnt": "ERIKA" },
            "dob": "1964-08-12"
        });
        dcc[kind] = json!([entry]);

        RawPayload {
            raw: Some("HC1:NCFOXN%TS3DH3ZSUZK+.V0ETD%65NL-AH".into()),
            decoded: Some(json!({ "1": "DE", "-260": { "1": dcc } })),
        }
    }

    fn vaccination_entry() -> Value {
        json!({
            "tg": "840539006", "vp": "1119349007", "mp": "EU/1/20/1528",
            "ma": "ORG-100030215", "dn": 2, "sd": 2, "dt": "2021-06-01",
            "co": "DE", "is": "Robert Koch-Institut",
            "ci": "URN:UVCI:01DE/IZ12345A/5CWLU12RNOB9RXSEOP6FG8#W"
        })
    }

    fn test_entry() -> Value {
        json!({
            "tg": "840539006", "tt": "LP6464-4", "sc": "2021-05-30T10:12:22Z",
            "tr": "260415000", "tc": "Testzentrum Köln Hbf", "co": "DE",
            "is": "Robert Koch-Institut", "ci": "URN:UVCI:01DE/IBMT102/18Q12HTUJ7#C"
        })
    }

    fn recovery_entry() -> Value {
        json!({
            "tg": "840539006", "fr": "2021-01-10", "co": "AT",
            "is": "Ministry of Health, Austria", "df": "2021-05-29",
            "du": "2021-06-15", "ci": "URN:UVCI:01:AT:858CC18CFCF5965EF82F60E493349AA5#K"
        })
    }

    #[test]
    fn test_decode_vaccination() {
        let cert = decode(&payload("v", vaccination_entry()), &value_sets()).unwrap();

        assert_eq!(cert.kind(), CertificateKind::Vaccination);
        assert_eq!(cert.name, "MUSTERMANN, Erika");
        assert_eq!(cert.date_of_birth, "1964-08-12T12:00:00Z");
        assert_eq!(cert.country, "Germany");
        assert_eq!(cert.issuer, "Robert Koch-Institut");

        let CertificateDetails::Vaccination(v) = &cert.details else {
            panic!("expected vaccination details");
        };
        assert_eq!(v.dose_number, "2");
        assert_eq!(v.total_doses, "2");
        assert_eq!(v.dose(), "2/2");
        assert_eq!(v.date_of_vaccination, "2021-06-01T12:00:00Z");
        assert_eq!(v.medical_product_key, "EU/1/20/1528");
        assert_eq!(v.vaccine_name, "Comirnaty");
        assert_eq!(v.manufacturer, "Biontech Manufacturing GmbH");
    }

    #[test]
    fn test_decode_test() {
        let cert = decode(&payload("t", test_entry()), &value_sets()).unwrap();

        let CertificateDetails::Test(t) = &cert.details else {
            panic!("expected test details");
        };
        assert_eq!(t.test_type, "Nucleic acid amplification");
        assert_eq!(t.test_result, "Not detected");
        assert_eq!(t.testing_time, "2021-05-30T12:00:00Z");
    }

    #[test]
    fn test_decode_recovery() {
        let cert = decode(&payload("r", recovery_entry()), &value_sets()).unwrap();

        assert_eq!(cert.country, "Austria");
        let CertificateDetails::Recovery(r) = &cert.details else {
            panic!("expected recovery details");
        };
        assert_eq!(r.positive_tested_date, "2021-01-10T12:00:00Z");
        assert_eq!(r.valid_from_date, "2021-05-29T12:00:00Z");
        assert_eq!(r.valid_until_date, "2021-06-15T12:00:00Z");
    }

    #[test]
    fn test_decode_is_idempotent() {
        let payload = payload("v", vaccination_entry());
        let sets = value_sets();
        assert_eq!(decode(&payload, &sets).unwrap(), decode(&payload, &sets).unwrap());
    }

    #[test]
    fn test_message_is_kept_verbatim() {
        let payload = payload("r", recovery_entry());
        let cert = decode(&payload, &value_sets()).unwrap();
        assert_eq!(Some(cert.message.as_str()), payload.raw.as_deref());
    }

    #[test]
    fn test_missing_raw_or_decoded() {
        let mut p = payload("v", vaccination_entry());
        p.raw = None;
        assert!(matches!(
            decode(&p, &value_sets()),
            Err(Error::MissingPayload(_))
        ));

        let mut p = payload("v", vaccination_entry());
        p.decoded = None;
        assert!(matches!(
            decode(&p, &value_sets()),
            Err(Error::MissingPayload(_))
        ));
    }

    #[test]
    fn test_missing_name_and_dob() {
        let mut p = payload("v", vaccination_entry());
        p.decoded.as_mut().unwrap()["-260"]["1"]
            .as_object_mut()
            .unwrap()
            .remove("nam");
        match decode(&p, &value_sets()) {
            Err(Error::MissingField(field)) => assert_eq!(field, "nam"),
            other => panic!("unexpected result: {other:?}"),
        }

        let mut p = payload("v", vaccination_entry());
        p.decoded.as_mut().unwrap()["-260"]["1"]["nam"]
            .as_object_mut()
            .unwrap()
            .remove("gn");
        match decode(&p, &value_sets()) {
            Err(Error::MissingField(field)) => assert_eq!(field, "nam.gn"),
            other => panic!("unexpected result: {other:?}"),
        }

        let mut p = payload("v", vaccination_entry());
        p.decoded.as_mut().unwrap()["-260"]["1"]
            .as_object_mut()
            .unwrap()
            .remove("dob");
        match decode(&p, &value_sets()) {
            Err(Error::MissingField(field)) => assert_eq!(field, "dob"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_hcert_claim() {
        let p = RawPayload {
            raw: Some("HC1:x".into()),
            decoded: Some(json!({ "1": "DE" })),
        };
        match decode(&p, &value_sets()) {
            Err(Error::MissingField(field)) => assert_eq!(field, "-260.1"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_and_ambiguous_kinds() {
        let mut p = payload("v", vaccination_entry());
        p.decoded.as_mut().unwrap()["-260"]["1"]
            .as_object_mut()
            .unwrap()
            .remove("v");
        assert!(matches!(
            decode(&p, &value_sets()),
            Err(Error::UnsupportedCertificateType)
        ));

        let mut p = payload("v", vaccination_entry());
        p.decoded.as_mut().unwrap()["-260"]["1"]["t"] = json!([test_entry()]);
        assert!(matches!(
            decode(&p, &value_sets()),
            Err(Error::AmbiguousCertificateType)
        ));
    }

    #[test]
    fn test_empty_entry_list() {
        let mut p = payload("v", vaccination_entry());
        p.decoded.as_mut().unwrap()["-260"]["1"]["v"] = json!([]);
        match decode(&p, &value_sets()) {
            Err(Error::MissingField(field)) => assert_eq!(field, "v[0]"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_country_code() {
        let mut entry = vaccination_entry();
        entry["co"] = json!("XX");
        match decode(&payload("v", entry), &value_sets()) {
            Err(Error::InvalidCode { category, code }) => {
                assert_eq!(category, "country");
                assert_eq!(code, "XX");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_vaccine_codes() {
        let mut entry = vaccination_entry();
        entry["mp"] = json!("EU/1/99/0000");
        assert!(matches!(
            decode(&payload("v", entry), &value_sets()),
            Err(Error::InvalidCode { category: "medical product", .. })
        ));

        let mut entry = vaccination_entry();
        entry["ma"] = json!("ORG-0");
        assert!(matches!(
            decode(&payload("v", entry), &value_sets()),
            Err(Error::InvalidCode { category: "manufacturer", .. })
        ));
    }

    #[test]
    fn test_unknown_test_codes() {
        let mut entry = test_entry();
        entry["tr"] = json!("260373001");
        assert!(matches!(
            decode(&payload("t", entry), &value_sets()),
            Err(Error::InvalidCode { category: "test result", .. })
        ));

        let mut entry = test_entry();
        entry["tt"] = json!("LP217198-3");
        assert!(matches!(
            decode(&payload("t", entry), &value_sets()),
            Err(Error::InvalidCode { category: "test type", .. })
        ));
    }

    #[test]
    fn test_partial_birth_date_passes_through() {
        let mut p = payload("r", recovery_entry());
        p.decoded.as_mut().unwrap()["-260"]["1"]["dob"] = json!("1964-08");
        let cert = decode(&p, &value_sets()).unwrap();
        assert_eq!(cert.date_of_birth, "1964-08");
    }

    #[test]
    fn test_missing_recovery_date_names_path() {
        let mut entry = recovery_entry();
        entry.as_object_mut().unwrap().remove("du");
        match decode(&payload("r", entry), &value_sets()) {
            Err(Error::MissingField(field)) => assert_eq!(field, "r[0].du"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
