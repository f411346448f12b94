//! Label translation.
//!
//! Every human-visible pass label goes through [`Translate`]. Callers can pass
//! a closure, or a [`MessageCatalog`] loaded from a TOML locale file:
//!
//! ```toml
//! [pass]
//! name = "Name"
//! dose = "Dosis"
//!
//! [pass.certificateType]
//! label = "Zertifikat"
//! vaccination = "Impfung"
//! ```
//!
//! Nested tables are flattened to dotted keys (`pass.certificateType.label`).

use crate::Result;
use std::collections::HashMap;
use std::path::Path;

/// Resolves a translation key to display text.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// English strings for every key the pass assembler asks for.
const ENGLISH: &[(&str, &str)] = &[
    ("pass.certificateType.label", "Certificate Type"),
    ("pass.certificateType.vaccination", "Vaccination"),
    ("pass.certificateType.test", "Test"),
    ("pass.certificateType.recovery", "Recovery"),
    ("pass.name", "Name"),
    ("pass.dose", "Dose"),
    ("pass.dateOfVaccination", "Date of Vaccination"),
    ("pass.validUntil", "Valid Until"),
    ("pass.validFrom", "Valid From"),
    ("pass.vaccine", "Vaccine"),
    ("pass.dateOfBirth", "Date of Birth"),
    ("pass.testType", "Test Type"),
    ("pass.testResult", "Test Result"),
    ("pass.testingTime", "Time of Testing"),
    ("pass.positiveTested", "First Positive Test"),
    ("pass.uniqueCertificateIdentifier", "Unique Certificate Identifier"),
    ("pass.certificateIssuer", "Certificate Issuer"),
    ("pass.country", "Country"),
    ("pass.disclaimer.label", "Disclaimer"),
    (
        "pass.disclaimer.value",
        "This pass is a convenience copy of your digital certificate. \
         Only the QR code is legally relevant and must be verified by an official app.",
    ),
    ("pass.credits.label", "Credits"),
    ("pass.credits.value", "Created with dccpass."),
];

/// A flat key to message map. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Built-in English catalog.
    pub fn english() -> Self {
        Self {
            messages: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Parse a TOML locale document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut messages = HashMap::new();
        flatten("", &table, &mut messages);
        Ok(Self { messages })
    }

    /// Load a TOML locale file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Layer `other` on top of `self`; keys in `other` win.
    pub fn merged_with(mut self, other: MessageCatalog) -> Self {
        self.messages.extend(other.messages);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translate for MessageCatalog {
    fn translate(&self, key: &str) -> String {
        match self.get(key) {
            Some(message) => message.to_string(),
            None => {
                log::debug!("no translation for {key}");
                key.to_string()
            }
        }
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(inner) => flatten(&full, inner, out),
            toml::Value::String(s) => {
                out.insert(full, s.clone());
            }
            other => {
                out.insert(full, other.to_string());
            }
        }
    }
}
