//! OTA Common - Shared domain types for the update manifest server.
//!
//! Release channels, update artifacts, and companion metadata parsing.

pub mod app_ini;
pub mod channel;
pub mod error;
pub mod update;

pub use app_ini::ApplicationIni;
pub use channel::Channel;
pub use error::OtaError;
pub use update::UpdateFile;
