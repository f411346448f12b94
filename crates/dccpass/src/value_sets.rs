//! Reference value sets used to validate coded certificate claims.
//!
//! The EU DCC schema encodes countries, vaccines, manufacturers, test types
//! and test results as short codes. Each category is published as a JSON
//! document with a `valueSetValues` object mapping a code to its display
//! metadata:
//!
//! ```json
//! { "valueSetId": "country-2-codes",
//!   "valueSetValues": { "DE": { "display": "Germany", "active": true } } }
//! ```
//!
//! Value sets are fetched once per pass creation through a
//! [`ValueSetSource`] and are read-only afterwards.

use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Value-set category names, in the order they are fetched.
pub const CATEGORIES: [&str; 5] = [
    "countryCodes",
    "medicalProducts",
    "manufacturers",
    "testTypes",
    "testResults",
];

/// Display metadata for one code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueSetValue {
    pub display: String,
}

/// One value-set category: code to display string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValueSetTable {
    #[serde(rename = "valueSetValues")]
    values: HashMap<String, ValueSetValue>,
}

impl ValueSetTable {
    /// Build a table from `(code, display)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(code, display)| {
                (
                    code.into(),
                    ValueSetValue {
                        display: display.into(),
                    },
                )
            })
            .collect();
        Self { values }
    }

    /// Display string for `code`, if the code is known.
    pub fn display(&self, code: &str) -> Option<&str> {
        self.values.get(code).map(|v| v.display.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All five reference tables needed to decode a certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSets {
    pub country_codes: ValueSetTable,
    pub medical_products: ValueSetTable,
    pub manufacturers: ValueSetTable,
    pub test_types: ValueSetTable,
    pub test_results: ValueSetTable,
}

impl ValueSets {
    /// Parse the five category documents, given in [`CATEGORIES`] order.
    pub fn from_documents(documents: [&[u8]; 5]) -> Result<Self> {
        let [countries, products, manufacturers, types, results] = documents;
        Ok(Self {
            country_codes: serde_json::from_slice(countries)?,
            medical_products: serde_json::from_slice(products)?,
            manufacturers: serde_json::from_slice(manufacturers)?,
            test_types: serde_json::from_slice(types)?,
            test_results: serde_json::from_slice(results)?,
        })
    }
}

/// Source of reference value sets.
///
/// Implementations perform a single fetch with no retry; a failure aborts the
/// pass creation that requested it.
#[async_trait]
pub trait ValueSetSource: Send + Sync {
    async fn fetch(&self) -> Result<ValueSets>;
}

#[async_trait]
impl ValueSetSource for ValueSets {
    async fn fetch(&self) -> Result<ValueSets> {
        Ok(self.clone())
    }
}

/// Fetches `<base_url>/<category>.json` for every category over HTTP.
pub struct HttpValueSetSource {
    base_url: String,
    http: reqwest::Client,
}

impl HttpValueSetSource {
    /// Create a source rooted at `base_url` (trailing slash optional).
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("dccpass/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn fetch_category(&self, category: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{}.json", self.base_url, category);
        log::debug!("fetching value set {url}");

        let resp = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to fetch {category}: {e}")))?;

        if !resp.status().is_success() {
            return Err(Error::Network(format!(
                "HTTP {} fetching {}",
                resp.status(),
                url
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Network(format!("Read body failed for {category}: {e}")))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ValueSetSource for HttpValueSetSource {
    async fn fetch(&self) -> Result<ValueSets> {
        log::info!("fetching value sets from {}", self.base_url);
        let mut docs = Vec::with_capacity(CATEGORIES.len());
        for category in CATEGORIES {
            docs.push(self.fetch_category(category).await?);
        }
        ValueSets::from_documents([
            docs[0].as_slice(),
            docs[1].as_slice(),
            docs[2].as_slice(),
            docs[3].as_slice(),
            docs[4].as_slice(),
        ])
    }
}

/// Reads `<dir>/<category>.json` for every category from disk.
#[derive(Debug, Clone)]
pub struct DirValueSetSource {
    dir: PathBuf,
}

impl DirValueSetSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ValueSetSource for DirValueSetSource {
    async fn fetch(&self) -> Result<ValueSets> {
        log::info!("loading value sets from {}", self.dir.display());
        let mut docs = Vec::with_capacity(CATEGORIES.len());
        for category in CATEGORIES {
            let path = self.dir.join(format!("{category}.json"));
            let data = tokio::fs::read(&path).await.map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read {}: {}", path.display(), e),
                ))
            })?;
            docs.push(data);
        }
        ValueSets::from_documents([
            docs[0].as_slice(),
            docs[1].as_slice(),
            docs[2].as_slice(),
            docs[3].as_slice(),
            docs[4].as_slice(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const COUNTRIES: &str = r#"{
        "valueSetId": "country-2-codes",
        "valueSetDate": "2021-04-27",
        "valueSetValues": {
            "DE": { "display": "Germany", "lang": "en", "active": true },
            "AT": { "display": "Austria", "lang": "en", "active": true }
        }
    }"#;

    #[test]
    fn test_table_parses_extra_fields() {
        let table: ValueSetTable = serde_json::from_str(COUNTRIES).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.display("DE"), Some("Germany"));
        assert_eq!(table.display("XX"), None);
    }

    #[test]
    fn test_missing_value_set_values_is_error() {
        let result: std::result::Result<ValueSetTable, _> =
            serde_json::from_str(r#"{"valueSetId": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_pairs() {
        let table = ValueSetTable::from_pairs([("260415000", "Not detected")]);
        assert_eq!(table.display("260415000"), Some("Not detected"));
        assert!(!table.is_empty());
    }

    #[tokio::test]
    async fn test_dir_source_reads_all_categories() {
        let dir = tempdir().unwrap();
        for category in CATEGORIES {
            fs::write(dir.path().join(format!("{category}.json")), COUNTRIES).unwrap();
        }

        let sets = DirValueSetSource::new(dir.path()).fetch().await.unwrap();
        assert_eq!(sets.country_codes.display("AT"), Some("Austria"));
        assert_eq!(sets.test_results.len(), 2);
    }

    #[tokio::test]
    async fn test_dir_source_missing_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("countryCodes.json"), COUNTRIES).unwrap();

        let result = DirValueSetSource::new(dir.path()).fetch().await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // Port 9 (discard) on localhost is closed in test environments.
        let source = HttpValueSetSource::new("http://127.0.0.1:9", None).unwrap();
        let result = source.fetch().await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
