//! Update manifest rendering.
//!
//! The document format is fixed for client compatibility; rendering must be
//! byte-reproducible for identical inputs.

use ota_common::{ApplicationIni, UpdateFile};

const DOWNLOAD_BASE: &str = "http://update.boot2gecko.org";
const LICENSE_URL: &str = "http://www.mozilla.com/test/sample-eula.html";
const DETAILS_URL: &str = "http://www.mozilla.com/test/sample-details.html";

/// Render the update manifest for `update`.
///
/// `base_path` is the path segment of the download URL (the final component
/// of the watched directory). `dogfood_id` is an opaque passthrough value;
/// when present it is appended to the download URL as the
/// `dogfooding_prerelease_id` query parameter.
pub fn render(
    update: &UpdateFile,
    application: &ApplicationIni,
    hash: &str,
    base_path: &str,
    dogfood_id: Option<&str>,
) -> String {
    let query = match dogfood_id {
        Some(id) => format!("?dogfooding_prerelease_id={}", id),
        None => String::new(),
    };
    format!(
        r#"<?xml version="1.0"?>
<updates>
  <update type="minor" appVersion="{version}" version="{version}" extensionVersion="{version}" buildID="{build_id}" licenseURL="{license}" detailsURL="{details}">
    <patch type="complete" URL="{base}/{path}/{filename}{query}" hashFunction="SHA512" hashValue="{hash}" size="{size}"/>
  </update>
</updates>"#,
        version = application.version,
        build_id = application.build_id,
        license = LICENSE_URL,
        details = DETAILS_URL,
        base = DOWNLOAD_BASE,
        path = base_path,
        filename = update.filename(),
        query = query,
        hash = hash,
        size = update.size(),
    )
}
