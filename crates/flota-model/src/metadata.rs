//! Export metadata, output formats and artifact naming.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Substituted when the caller leaves the filename base blank.
pub const DEFAULT_FILENAME_BASE: &str = "export";

/// Print page orientation for the paginated formats (XLSX print setup and
/// PDF page dimensions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Target encoding of one export job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Xlsx, ExportFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Footer bar fill color, validated `#RRGGBB` hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FooterColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FooterColor {
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        let hex = input.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ModelError::InvalidColor(input.to_string()));
        }
        let rgb = u32::from_str_radix(hex, 16)
            .map_err(|_| ModelError::InvalidColor(input.to_string()))?;
        Ok(Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        })
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels as 0.0..=1.0 floats, as PDF content streams expect.
    pub fn unit_rgb(&self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl Default for FooterColor {
    fn default() -> Self {
        // Institutional teal used by the report footers.
        Self {
            r: 0x1F,
            g: 0x7A,
            b: 0x8C,
        }
    }
}

impl TryFrom<String> for FooterColor {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FooterColor> for String {
    fn from(color: FooterColor) -> Self {
        color.hex()
    }
}

/// Document-level settings for one export, user-editable in the dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub title: String,
    pub filename_base: String,
    pub sheet_name: String,
    pub orientation: Orientation,
    pub footer_color: FooterColor,
    pub include_generated_timestamp: bool,
    pub logo_path: Option<PathBuf>,
}

impl Default for ExportMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            filename_base: DEFAULT_FILENAME_BASE.to_string(),
            sheet_name: "Datos".to_string(),
            orientation: Orientation::Portrait,
            footer_color: FooterColor::default(),
            include_generated_timestamp: true,
            logo_path: None,
        }
    }
}

/// Compact instant token for artifact names: the RFC 3339 form of `now`
/// reduced to its digits and truncated to 15 characters.
pub fn timestamp_token(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .chars()
        .filter(char::is_ascii_digit)
        .take(15)
        .collect()
}

/// Artifact name `<base>_<token>.<ext>`; a blank base falls back to
/// [`DEFAULT_FILENAME_BASE`] silently.
pub fn export_filename(base: &str, format: ExportFormat, now: DateTime<Utc>) -> String {
    let base = base.trim();
    let base = if base.is_empty() {
        DEFAULT_FILENAME_BASE
    } else {
        base
    };
    format!(
        "{base}_{token}.{ext}",
        token = timestamp_token(now),
        ext = format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_token_is_fifteen_digits() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 9).unwrap();
        let token = timestamp_token(now);
        assert_eq!(token.len(), 15);
        assert!(token.starts_with("20240305100009"));
    }

    #[test]
    fn blank_filename_base_falls_back() {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 9).unwrap();
        let name = export_filename("   ", ExportFormat::Csv, now);
        assert!(name.starts_with("export_20240305"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn footer_color_round_trips() {
        let color = FooterColor::parse("#1f7a8c").unwrap();
        assert_eq!(color.hex(), "#1F7A8C");
        assert!(FooterColor::parse("azul").is_err());
        assert!(FooterColor::parse("#12345").is_err());
    }
}
