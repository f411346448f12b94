#![allow(dead_code)]

use async_trait::async_trait;
use dccpass::{AssetBundle, ManifestSigner, PassBuilder, PassIdentifiers, RawPayload, Result};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Mutex;

pub const RAW: &str = "HC1:NCFOXN%TS3DH3ZSUZK+.V0ETD%65NL-AH-R6IOOP-IZ5SZ3E+Z2BA";

/// Signs by echoing a fixed signature and remembers every manifest it saw.
pub struct FakeSigner {
    pub seen: Mutex<Vec<Vec<u8>>>,
}

impl FakeSigner {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ManifestSigner for FakeSigner {
    async fn sign(&self, manifest: &[u8]) -> Result<Vec<u8>> {
        self.seen.lock().unwrap().push(manifest.to_vec());
        Ok(b"PKCS7-DETACHED".to_vec())
    }
}

pub fn builder() -> PassBuilder {
    PassBuilder::new(PassIdentifiers::new("pass.com.example.covid", "ABCDE12345"))
        .assets(AssetBundle::new(
            b"icon".to_vec(),
            b"icon@2x".to_vec(),
            b"logo".to_vec(),
            b"logo@2x".to_vec(),
        ))
}

pub fn vaccination_payload() -> RawPayload {
    RawPayload {
        raw: Some(RAW.into()),
        decoded: Some(json!({
            "1": "DE",
            "4": 1_655_000_000,
            "-260": { "1": {
                "ver": "1.3.0",
                "nam": { "fn": "Mustermann", "gn": "Erika", "fnt": "MUSTERMANN", "gnt": "ERIKA" },
                "dob": "1964-08-12",
                "v": [{
                    "tg": "840539006", "vp": "1119349007", "mp": "EU/1/20/1528",
                    "ma": "ORG-100030215", "dn": 2, "sd": 2, "dt": "2021-06-01",
                    "co": "DE", "is": "Robert Koch-Institut",
                    "ci": "URN:UVCI:01DE/IZ12345A/5CWLU12RNOB9RXSEOP6FG8#W"
                }]
            }}
        })),
    }
}

fn table(values: &[(&str, &str)]) -> Value {
    let mut set = serde_json::Map::new();
    for (code, display) in values {
        set.insert(code.to_string(), json!({ "display": display, "active": true }));
    }
    json!({ "valueSetId": "fixture", "valueSetValues": set })
}

/// The five category documents, keyed by category name.
pub fn value_set_documents() -> Vec<(&'static str, Value)> {
    vec![
        ("countryCodes", table(&[("DE", "Germany"), ("AT", "Austria")])),
        ("medicalProducts", table(&[("EU/1/20/1528", "Comirnaty")])),
        ("manufacturers", table(&[("ORG-100030215", "Biontech Manufacturing GmbH")])),
        ("testTypes", table(&[("LP6464-4", "Nucleic acid amplification")])),
        ("testResults", table(&[("260415000", "Not detected")])),
    ]
}

/// Write the category documents as `<dir>/<category>.json`.
pub fn write_value_sets(dir: &Path) {
    for (category, doc) in value_set_documents() {
        std::fs::write(dir.join(format!("{category}.json")), doc.to_string()).unwrap();
    }
}

/// Read every entry of a `.pkpass` into memory.
pub fn read_entries(pkpass: &[u8]) -> Vec<(String, Vec<u8>)> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(pkpass)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).unwrap();
            (file.name().to_string(), buf)
        })
        .collect()
}

pub fn entry<'a>(entries: &'a [(String, Vec<u8>)], name: &str) -> &'a [u8] {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, data)| data.as_slice())
        .unwrap_or_else(|| panic!("{name} missing from archive"))
}
