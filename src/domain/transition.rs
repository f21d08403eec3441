//! Next-version computation
//!
//! Given the current version and a release intent, decide the next version
//! or reject the move. Pure functions only: nothing here touches the manifest
//! or the repository.

use crate::domain::channel::Channel;
use crate::domain::version::VersionParts;
use crate::error::{BumpError, Result};
use std::fmt;

/// Which numeric component of the core to bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseSize {
    Major,
    Minor,
    Patch,
}

impl ReleaseSize {
    pub const ALL: [ReleaseSize; 3] = [ReleaseSize::Patch, ReleaseSize::Minor, ReleaseSize::Major];

    /// Apply the bump to a numeric core, resetting lower components.
    ///
    /// Returns `None` when the bumped component would overflow.
    pub fn apply(self, major: u64, minor: u64, patch: u64) -> Option<(u64, u64, u64)> {
        match self {
            ReleaseSize::Major => Some((major.checked_add(1)?, 0, 0)),
            ReleaseSize::Minor => Some((major, minor.checked_add(1)?, 0)),
            ReleaseSize::Patch => Some((major, minor, patch.checked_add(1)?)),
        }
    }
}

impl fmt::Display for ReleaseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseSize::Major => write!(f, "major"),
            ReleaseSize::Minor => write!(f, "minor"),
            ReleaseSize::Patch => write!(f, "patch"),
        }
    }
}

/// A user's release intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub size: ReleaseSize,
    pub prerelease: bool,
    pub channel: Option<Channel>,
}

impl ReleaseRequest {
    /// A final release of the given size
    pub fn final_release(size: ReleaseSize) -> Self {
        ReleaseRequest {
            size,
            prerelease: false,
            channel: None,
        }
    }

    /// A release on the given channel
    pub fn on_channel(size: ReleaseSize, channel: Channel) -> Self {
        ReleaseRequest {
            size,
            prerelease: true,
            channel: Some(channel),
        }
    }

    /// Build a request from a menu target
    pub fn for_target(size: ReleaseSize, target: ReleaseTarget) -> Self {
        match target {
            ReleaseTarget::Final => ReleaseRequest::final_release(size),
            ReleaseTarget::Channel(channel) => ReleaseRequest::on_channel(size, channel),
        }
    }

    fn target_channel(&self) -> Option<Channel> {
        if self.prerelease {
            self.channel
        } else {
            None
        }
    }
}

/// Release kind offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseTarget {
    Final,
    Channel(Channel),
}

impl fmt::Display for ReleaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseTarget::Final => write!(f, "Final (production)"),
            ReleaseTarget::Channel(channel) => write!(f, "{} release", channel.label()),
        }
    }
}

/// Compute the next version string.
///
/// # Arguments
/// * `current` - Current version string
/// * `size` - Requested bump size; only used from a final version, or when
///   leaving a post release for a final one
/// * `is_prerelease` - Whether a channel release is requested
/// * `channel` - Requested channel
///
/// # Returns
/// * `Ok(String)` - The next version
/// * `Err(BumpError::InvalidVersion)` - If `current` does not parse
/// * `Err(BumpError::TransitionRejected)` - If the channel move is forbidden
///
/// # Example
/// ```
/// use bump_version::domain::{next_version, Channel, ReleaseSize};
///
/// assert_eq!(next_version("1.0.0", ReleaseSize::Patch, true, Some(Channel::Alpha)).unwrap(), "1.0.1a0");
/// assert_eq!(next_version("1.0.0a0", ReleaseSize::Patch, true, Some(Channel::Alpha)).unwrap(), "1.0.0a1");
/// assert_eq!(next_version("1.0.0rc1", ReleaseSize::Patch, false, None).unwrap(), "1.0.0");
/// ```
pub fn next_version(
    current: &str,
    size: ReleaseSize,
    is_prerelease: bool,
    channel: Option<Channel>,
) -> Result<String> {
    let parts = VersionParts::parse(current)?;
    let request = ReleaseRequest {
        size,
        prerelease: is_prerelease,
        channel,
    };
    next_from_parts(&parts, &request)
}

/// Compute the next version from already parsed parts.
pub fn next_from_parts(current: &VersionParts, request: &ReleaseRequest) -> Result<String> {
    let core = current.core();

    let Some((from, counter)) = current.prerelease else {
        return next_from_final(current, request);
    };

    let Some(to) = request.target_channel() else {
        // A post release already follows its final release, so going final
        // from post always moves the numeric core forward.
        if from == Channel::Post {
            return bump_core(current, request.size);
        }
        return Ok(core);
    };

    if from == Channel::Post {
        if to == Channel::Post {
            return Ok(Channel::Post.render(&core, next_counter(current, counter)?));
        }
        return Err(BumpError::rejected(
            from.to_string(),
            to.to_string(),
            format!("cannot move from post back to {}", to),
        ));
    }

    if to == Channel::Post {
        return Err(BumpError::rejected(
            from.to_string(),
            to.to_string(),
            "cannot move directly from a pre-release to a post release; release a final version first",
        ));
    }

    if to == from {
        return Ok(to.render(&core, next_counter(current, counter)?));
    }

    if is_channel_downgrade(from, to) {
        tracing::warn!(from = %from, to = %to, "moving down the pre-release order");
    }
    Ok(to.render(&core, 0))
}

fn next_from_final(current: &VersionParts, request: &ReleaseRequest) -> Result<String> {
    let target = request.target_channel();

    if target == Some(Channel::Post) {
        return Ok(Channel::Post.render(&current.core(), 0));
    }

    let core = bump_core(current, request.size)?;

    Ok(match target {
        Some(channel) => channel.render(&core, 0),
        None => core,
    })
}

fn next_counter(current: &VersionParts, counter: u64) -> Result<u64> {
    counter.checked_add(1).ok_or_else(|| {
        BumpError::invalid_version(format!("{} (release counter cannot be incremented)", current))
    })
}

fn bump_core(current: &VersionParts, size: ReleaseSize) -> Result<String> {
    let (major, minor, patch) = size
        .apply(current.major, current.minor, current.patch)
        .ok_or_else(|| {
            BumpError::invalid_version(format!("{} ({} cannot be incremented)", current, size))
        })?;
    Ok(format!("{}.{}.{}", major, minor, patch))
}

/// Whether moving `from → to` goes down the `dev < a < b < rc` order.
///
/// Downgrades are allowed; callers use this to warn.
pub fn is_channel_downgrade(from: Channel, to: Channel) -> bool {
    to != Channel::Post && from != Channel::Post && to.rank() < from.rank()
}

/// Release kinds reachable from `current`, final first.
///
/// Mirrors the rules of [`next_from_parts`] so that the front-end only offers
/// choices the engine accepts. Downgrades are not offered even though the
/// engine tolerates them. Final is always reachable: from a pre-release it
/// drops the channel, from post it bumps the core.
pub fn available_targets(current: &VersionParts) -> Vec<ReleaseTarget> {
    let from = current.prerelease_type();
    let mut targets = vec![ReleaseTarget::Final];

    for channel in Channel::ALL {
        let reachable = match (from, channel) {
            (None, _) => true,
            (Some(Channel::Post), to) => to == Channel::Post,
            (Some(_), Channel::Post) => false,
            (Some(from), to) => to.rank() >= from.rank(),
        };
        if reachable {
            targets.push(ReleaseTarget::Channel(channel));
        }
    }

    targets
}
