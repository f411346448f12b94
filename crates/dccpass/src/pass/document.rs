//! `pass.json` document model.
//!
//! Field names follow the wallet pass schema (camelCase on the wire).

use serde::{Deserialize, Serialize};

/// Top-level `pass.json` document for a generic-style pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassDocument {
    pub pass_type_identifier: String,
    pub team_identifier: String,
    pub sharing_prohibited: bool,
    pub voided: bool,
    pub format_version: u32,
    pub logo_text: String,
    pub organization_name: String,
    pub description: String,
    pub label_color: String,
    pub foreground_color: String,
    pub background_color: String,
    pub serial_number: String,
    pub barcodes: Vec<Barcode>,
    /// Legacy single-barcode key for iOS versions before 9.
    pub barcode: Barcode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    pub generic: FieldGroups,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    pub message: String,
    pub format: String,
    pub message_encoding: String,
}

impl Barcode {
    pub const FORMAT_QR: &'static str = "PKBarcodeFormatQR";

    /// A UTF-8 QR code carrying `message` verbatim.
    pub fn qr(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            format: Self::FORMAT_QR.to_string(),
            message_encoding: "utf-8".to_string(),
        }
    }
}

/// The field groups of a generic pass, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroups {
    pub header_fields: Vec<Field>,
    pub primary_fields: Vec<Field>,
    pub secondary_fields: Vec<Field>,
    pub auxiliary_fields: Vec<Field>,
    pub back_fields: Vec<Field>,
}

/// A single labeled pass field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<TextAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_style: Option<DateStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_style: Option<DateStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignores_time_zone: Option<bool>,
}

impl Field {
    /// A plain field with no alignment or date styling.
    pub fn plain(key: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: value.into(),
            text_alignment: None,
            date_style: None,
            time_style: None,
            ignores_time_zone: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    #[serde(rename = "PKTextAlignmentLeft")]
    Left,
    #[serde(rename = "PKTextAlignmentCenter")]
    Center,
    #[serde(rename = "PKTextAlignmentRight")]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateStyle {
    #[serde(rename = "PKDateStyleNone")]
    None,
    #[serde(rename = "PKDateStyleShort")]
    Short,
    #[serde(rename = "PKDateStyleMedium")]
    Medium,
    #[serde(rename = "PKDateStyleLong")]
    Long,
}
