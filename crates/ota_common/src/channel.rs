//! Release channels and the artifact naming convention.
//!
//! An update artifact is named `<prefix><stamp>.mar`, where the prefix is
//! fixed per channel and the stamp is an opaque version stamp. The channel
//! is a configuration parameter of the registry; nothing else differs
//! between channels.

use std::fmt;
use std::str::FromStr;

/// Filename suffix shared by all channels.
pub const MAR_SUFFIX: &str = ".mar";

/// Release channel, selecting the artifact filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channel {
    #[default]
    Nightly,
    Stable,
}

impl Channel {
    /// Filename prefix of update artifacts on this channel.
    pub fn prefix(&self) -> &'static str {
        match self {
            Channel::Nightly => "b2g_update_",
            Channel::Stable => "b2g_stable_update_",
        }
    }

    /// Whether `filename` follows this channel's naming convention.
    pub fn matches(&self, filename: &str) -> bool {
        filename.starts_with(self.prefix()) && filename.ends_with(MAR_SUFFIX)
    }

    /// Version stamp of `filename`: the prefix stripped from the front and
    /// the suffix from the end. `None` if the name does not carry both.
    pub fn stamp_of<'a>(&self, filename: &'a str) -> Option<&'a str> {
        filename
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_suffix(MAR_SUFFIX))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Nightly => write!(f, "nightly"),
            Channel::Stable => write!(f, "stable"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nightly" => Ok(Channel::Nightly),
            "stable" => Ok(Channel::Stable),
            other => Err(format!("unknown channel `{}` (expected nightly or stable)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nightly_matches() {
        let channel = Channel::Nightly;
        assert!(channel.matches("b2g_update_20130101000000.mar"));
        assert!(!channel.matches("b2g_update_20130101000000.mar.tmp"));
        assert!(!channel.matches("application_20130101000000.ini"));
        assert!(!channel.matches("other_update_20130101000000.mar"));
    }

    #[test]
    fn test_stable_prefix_is_distinct() {
        let stable = Channel::Stable;
        assert!(stable.matches("b2g_stable_update_20130101000000.mar"));
        assert!(!stable.matches("b2g_update_20130101000000.mar"));
        assert!(!Channel::Nightly.matches("b2g_stable_update_x.mar"));
    }

    #[test]
    fn test_stamp_round_trips() {
        let channel = Channel::Nightly;
        let filename = "b2g_update_20130101000000.mar";
        let stamp = channel.stamp_of(filename).unwrap();
        assert_eq!(stamp, "20130101000000");
        assert_eq!(format!("{}{}{}", channel.prefix(), stamp, MAR_SUFFIX), filename);
    }

    #[test]
    fn test_stamp_of_rejects_bad_names() {
        assert_eq!(Channel::Nightly.stamp_of("b2g_update_x.zip"), None);
        assert_eq!(Channel::Stable.stamp_of("b2g_update_x.mar"), None);
    }

    #[test]
    fn test_parse_from_cli() {
        assert_eq!("nightly".parse::<Channel>().unwrap(), Channel::Nightly);
        assert_eq!("stable".parse::<Channel>().unwrap(), Channel::Stable);
        assert!("beta".parse::<Channel>().is_err());
    }
}
