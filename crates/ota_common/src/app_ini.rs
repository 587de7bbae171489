//! Companion metadata parsing.
//!
//! Every update artifact ships with an `application_<stamp>.ini` next to it,
//! carrying the build identifier and version the manifest advertises. The
//! file is a small INI dialect: `[Section]` headers, `Key=Value` pairs,
//! `;`/`#` comments.

use crate::error::OtaError;
use std::path::Path;

const APP_SECTION: &str = "App";
const BUILD_ID_KEY: &str = "BuildID";
const VERSION_KEY: &str = "Version";

/// Parsed `application_<stamp>.ini` data. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationIni {
    pub build_id: String,
    pub version: String,
}

impl ApplicationIni {
    /// Load and parse the companion file at `path`.
    ///
    /// A missing file is reported as [`OtaError::MetadataNotFound`] rather
    /// than a bare IO error; a deployed artifact without its companion is a
    /// data-integrity defect the caller propagates.
    pub async fn load(path: &Path) -> Result<Self, OtaError> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OtaError::MetadataNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&text)
    }

    /// Parse INI text, requiring `BuildID` and `Version` under `[App]`.
    pub fn parse(text: &str) -> Result<Self, OtaError> {
        let mut section = String::new();
        let mut build_id = None;
        let mut version = None;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = header.trim().to_string();
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if section != APP_SECTION {
                continue;
            }
            match key.trim() {
                BUILD_ID_KEY => build_id = Some(value.trim().to_string()),
                VERSION_KEY => version = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let build_id = build_id.ok_or(OtaError::MetadataKeyMissing {
            section: APP_SECTION,
            key: BUILD_ID_KEY,
        })?;
        let version = version.ok_or(OtaError::MetadataKeyMissing {
            section: APP_SECTION,
            key: VERSION_KEY,
        })?;

        Ok(Self { build_id, version })
    }
}
