//! Wallet pass document construction.
//!
//! This module turns a decoded [`Certificate`](crate::Certificate) into the
//! `pass.json` document:
//! - [`fields`] builds the kind-specific secondary and auxiliary rows
//! - [`assembler`] adds identifiers, colors, barcode, expiration and the
//!   fixed header, primary and back rows
//! - [`document`] is the serde model written to `pass.json`
//!
//! # Field Layout
//!
//! | Group | Vaccination | Test | Recovery |
//! |-------|-------------|------|----------|
//! | header | type | type | type |
//! | primary | name | name | name |
//! | secondary | dose, dov, exp | testType, testResult | validFrom, validUntil |
//! | auxiliary | vaccine, dob | testingTime, dob | firstPositiveTested, dob |
//! | back | uvci, issuer, country, disclaimer, credits | same | same |

pub mod assembler;
pub mod document;
pub mod fields;

pub use assembler::{assemble, assemble_with_serial, expiration_date, PassIdentifiers};
pub use document::{Barcode, DateStyle, Field, FieldGroups, PassDocument, TextAlignment};
pub use fields::{secondary_and_auxiliary_fields, FieldBuilder, VariantFields};
