//! # Player Tag Model
//!
//! A player tag identifies a game account and is written with a leading `#`
//! (e.g. `#8PU82CPP`). The API expects the tag as a path segment with the
//! hash percent-encoded, so `#8PU82CPP` becomes `%238PU82CPP`.

use std::fmt;
use std::str::FromStr;

use crate::error::TagError;

/// Accounts probed when no tags are given on the command line.
pub const DEFAULT_PLAYER_TAGS: [&str; 15] = [
    "#8PU82CPP",
    "#208L9JQV9",
    "#LCQVUU2PP",
    "#8VLCRQ9R9",
    "#RCUCC9JG8",
    "#VG0U9PQ9R",
    "#LCR9PLVC",
    "#9VRLPRC0V",
    "#29JYUGJRQ",
    "#YPV02J880",
    "#2QP8RPV9",
    "#8YQUYPJ",
    "#U8RP8G2VY",
    "#PVCGPVYGR",
    "#L2UP9GP9J",
];

/// A validated player tag, stored without its leading `#`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayerTag(String);

impl PlayerTag {
    /// The bare tag, without the `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The tag as a URL path segment: `#` is stripped and re-added as `%23`.
    pub fn path_segment(&self) -> String {
        format!("%23{}", self.0)
    }
}

impl FromStr for PlayerTag {
    type Err = TagError;

    /// Parses `#ABC123`, `abc123` or ` #abc123 ` into the same tag.
    ///
    /// Only one leading `#` is stripped. Anything other than ASCII
    /// alphanumerics in the remainder is rejected, so the path segment never
    /// needs further escaping.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if bare.is_empty() {
            return Err(TagError::Empty);
        }

        if let Some(ch) = bare.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(TagError::InvalidChar {
                tag: trimmed.to_string(),
                ch,
            });
        }

        Ok(Self(bare.to_ascii_uppercase()))
    }
}

impl fmt::Display for PlayerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub fn default_tags() -> Vec<PlayerTag> {
    DEFAULT_PLAYER_TAGS
        .iter()
        .filter_map(|raw| raw.parse().ok())
        .collect()
}
