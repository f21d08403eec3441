//! Release channels for PEP 440-style versions
//!
//! A channel is the pre-release or post-release category of a version.
//! Final releases have no channel.

use crate::error::{BumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release or post-release channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Development release (`.devN`)
    Dev,
    /// Alpha pre-release (`aN`)
    Alpha,
    /// Beta pre-release (`bN`)
    Beta,
    /// Release candidate (`rcN`)
    ReleaseCandidate,
    /// Post release (`.postN`)
    Post,
}

/// How a channel marker is attached to the numeric core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// `1.0.0.dev0`
    Dotted,
    /// `1.0.0a0`
    Compact,
}

/// Marker and render style for every channel.
const RENDER_TABLE: [(Channel, &str, RenderStyle); 5] = [
    (Channel::Dev, "dev", RenderStyle::Dotted),
    (Channel::Alpha, "a", RenderStyle::Compact),
    (Channel::Beta, "b", RenderStyle::Compact),
    (Channel::ReleaseCandidate, "rc", RenderStyle::Compact),
    (Channel::Post, "post", RenderStyle::Dotted),
];

/// Pre-release channels in ascending order. `Post` sits outside this order.
const PRERELEASE_ORDER: [Channel; 4] = [
    Channel::Dev,
    Channel::Alpha,
    Channel::Beta,
    Channel::ReleaseCandidate,
];

impl Channel {
    /// All channels, in the order the front-end lists them.
    pub const ALL: [Channel; 5] = [
        Channel::Dev,
        Channel::Alpha,
        Channel::Beta,
        Channel::ReleaseCandidate,
        Channel::Post,
    ];

    /// Parse a channel name, accepting `alpha`/`beta` spellings.
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    fn entry(self) -> (Channel, &'static str, RenderStyle) {
        RENDER_TABLE
            .iter()
            .copied()
            .find(|(channel, _, _)| *channel == self)
            .unwrap_or((self, "", RenderStyle::Compact))
    }

    /// Normalized marker (`dev`, `a`, `b`, `rc`, `post`)
    pub fn marker(self) -> &'static str {
        self.entry().1
    }

    pub fn render_style(self) -> RenderStyle {
        self.entry().2
    }

    /// Position in `dev < a < b < rc`, or -1 for `post`.
    pub fn rank(self) -> i32 {
        PRERELEASE_ORDER
            .iter()
            .position(|c| *c == self)
            .map(|p| p as i32)
            .unwrap_or(-1)
    }

    /// Render `<core><marker><counter>` in this channel's native style.
    pub fn render(self, core: &str, counter: u64) -> String {
        match self.render_style() {
            RenderStyle::Dotted => format!("{}.{}{}", core, self.marker(), counter),
            RenderStyle::Compact => format!("{}{}{}", core, self.marker(), counter),
        }
    }

    /// Human readable label used in menus
    pub fn label(self) -> &'static str {
        match self {
            Channel::Dev => "Dev",
            Channel::Alpha => "Alpha",
            Channel::Beta => "Beta",
            Channel::ReleaseCandidate => "RC",
            Channel::Post => "Post",
        }
    }
}

impl FromStr for Channel {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Channel::Dev),
            "alpha" | "a" => Ok(Channel::Alpha),
            "beta" | "b" => Ok(Channel::Beta),
            "rc" => Ok(Channel::ReleaseCandidate),
            "post" => Ok(Channel::Post),
            _ => Err(BumpError::invalid_version(format!(
                "unknown release channel '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}
