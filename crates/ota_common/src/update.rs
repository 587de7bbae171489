//! Update artifacts discovered on disk.

use crate::app_ini::ApplicationIni;
use crate::channel::Channel;
use crate::error::OtaError;
use sha2::{Digest, Sha512};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::sync::OnceCell;

/// One update artifact: filesystem metadata read eagerly at scan time, plus
/// the content hash and companion metadata resolved at most once per
/// in-memory object.
///
/// The resolve-once cells mean a resolved hash never changes even if the
/// backing file is rewritten on disk; the registry replaces the whole object
/// when a scan observes a different mtime or size, which bounds that
/// staleness window.
#[derive(Debug)]
pub struct UpdateFile {
    directory: PathBuf,
    filename: String,
    stamp: String,
    modified: SystemTime,
    size: u64,
    hash: OnceCell<String>,
    application: OnceCell<ApplicationIni>,
}

impl UpdateFile {
    /// Read filesystem metadata for `filename` inside `directory`.
    ///
    /// The name must follow `channel`'s naming convention; the registry
    /// filters on it before calling here.
    pub async fn stat(directory: &Path, filename: &str, channel: Channel) -> Result<Self, OtaError> {
        let stamp = channel
            .stamp_of(filename)
            .ok_or_else(|| OtaError::BadUpdateName(filename.to_string()))?
            .to_string();

        let meta = tokio::fs::metadata(directory.join(filename)).await?;
        Ok(Self {
            directory: directory.to_path_buf(),
            filename: filename.to_string(),
            stamp,
            modified: meta.modified()?,
            size: meta.len(),
            hash: OnceCell::new(),
            application: OnceCell::new(),
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Full path of the artifact.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// Path of the companion metadata file, `application_<stamp>.ini`.
    pub fn application_ini_path(&self) -> PathBuf {
        self.directory.join(format!("application_{}.ini", self.stamp))
    }

    /// Hex-encoded SHA-512 of the full artifact content.
    ///
    /// Computed at most once per object; concurrent callers coalesce onto a
    /// single read of the file and later callers reuse the cached digest.
    pub async fn hash(&self) -> Result<&str, OtaError> {
        self.hash
            .get_or_try_init(|| async {
                let bytes = tokio::fs::read(self.path()).await?;
                let mut digest = Sha512::new();
                digest.update(&bytes);
                Ok::<String, OtaError>(hex::encode(digest.finalize()))
            })
            .await
            .map(String::as_str)
    }

    /// Companion metadata, loaded and parsed at most once per object.
    ///
    /// A missing or malformed companion file is propagated; serving a
    /// manifest without its build metadata is never an option.
    pub async fn application(&self) -> Result<&ApplicationIni, OtaError> {
        self.application
            .get_or_try_init(|| async {
                ApplicationIni::load(&self.application_ini_path()).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FILENAME: &str = "b2g_update_20130101000000.mar";

    async fn write_artifact(dir: &Path, filename: &str, content: &[u8]) {
        tokio::fs::write(dir.join(filename), content).await.unwrap();
    }

    #[tokio::test]
    async fn test_stat_reads_metadata() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), FILENAME, &[0u8; 100]).await;

        let update = UpdateFile::stat(dir.path(), FILENAME, Channel::Nightly).await.unwrap();
        assert_eq!(update.filename(), FILENAME);
        assert_eq!(update.stamp(), "20130101000000");
        assert_eq!(update.size(), 100);
        assert_eq!(update.path(), dir.path().join(FILENAME));
    }

    #[tokio::test]
    async fn test_stat_rejects_foreign_names() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "notes.txt", b"x").await;

        let err = UpdateFile::stat(dir.path(), "notes.txt", Channel::Nightly).await.unwrap_err();
        assert!(matches!(err, OtaError::BadUpdateName(name) if name == "notes.txt"));
    }

    #[tokio::test]
    async fn test_hash_is_sha512_hex() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), FILENAME, b"mar bytes").await;

        let update = UpdateFile::stat(dir.path(), FILENAME, Channel::Nightly).await.unwrap();
        let hash = update.hash().await.unwrap();
        assert_eq!(hash.len(), 128);

        let mut digest = Sha512::new();
        digest.update(b"mar bytes");
        assert_eq!(hash, hex::encode(digest.finalize()));
    }

    #[tokio::test]
    async fn test_hash_computed_once() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), FILENAME, b"mar bytes").await;

        let update = UpdateFile::stat(dir.path(), FILENAME, Channel::Nightly).await.unwrap();
        let first = update.hash().await.unwrap().to_string();

        // Removing the backing file proves the second call never re-reads it.
        tokio::fs::remove_file(update.path()).await.unwrap();
        let second = update.hash().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_application_loads_companion() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), FILENAME, &[0u8; 10]).await;
        write_artifact(
            dir.path(),
            "application_20130101000000.ini",
            b"[App]\nBuildID=20130101000000\nVersion=1.0\n",
        )
        .await;

        let update = UpdateFile::stat(dir.path(), FILENAME, Channel::Nightly).await.unwrap();
        let app = update.application().await.unwrap();
        assert_eq!(app.build_id, "20130101000000");
        assert_eq!(app.version, "1.0");
    }

    #[tokio::test]
    async fn test_missing_companion_propagates() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), FILENAME, &[0u8; 10]).await;

        let update = UpdateFile::stat(dir.path(), FILENAME, Channel::Nightly).await.unwrap();
        let err = update.application().await.unwrap_err();
        assert!(matches!(err, OtaError::MetadataNotFound(_)));
    }
}
