use crate::domain::channel::Channel;
use crate::error::{BumpError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `M.m.p`, then an optional dotted or compact channel marker, then `+local`.
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^v?([0-9]+)\.([0-9]+)\.([0-9]+)",
        r"(?:\.(alpha|beta|rc|dev|post|a|b)\.?([0-9]+)?|(a|b|rc|dev|post)([0-9]+)?)?",
        r"(?:\+([0-9A-Za-z]+(?:[-_.][0-9A-Za-z]+)*))?$",
    ))
    .expect("version pattern is valid")
});

/// A version decomposed into numeric core, channel and local metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParts {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Channel and its counter; absent for final releases
    pub prerelease: Option<(Channel, u64)>,
    /// Local version label after `+`; bumps drop it
    pub local: Option<String>,
}

impl VersionParts {
    /// Create a final release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionParts {
            major,
            minor,
            patch,
            prerelease: None,
            local: None,
        }
    }

    /// Attach a channel and counter
    pub fn with_prerelease(mut self, channel: Channel, counter: u64) -> Self {
        self.prerelease = Some((channel, counter));
        self
    }

    /// Parse a version string using the engine grammar.
    ///
    /// Accepts an optional leading `v`, exactly three numeric core components,
    /// an optional channel marker in dotted (`1.0.0.beta1`, `1.0.0.dev0`) or
    /// compact (`1.0.0b1`, `1.0.0dev0`) form and an optional `+local` suffix.
    /// A marker without digits counts as 0.
    ///
    /// # Returns
    /// * `Ok(VersionParts)` - Successfully parsed version
    /// * `Err(BumpError::InvalidVersion)` - If the string does not match
    ///
    /// # Example
    /// ```
    /// use bump_version::domain::{Channel, VersionParts};
    ///
    /// let v = VersionParts::parse("1.0.0a0").unwrap();
    /// assert_eq!(v.prerelease, Some((Channel::Alpha, 0)));
    /// assert!(VersionParts::parse("1.2").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || BumpError::invalid_version(input);

        let caps = VERSION_RE.captures(input).ok_or_else(invalid)?;

        let number = |idx: usize| -> Result<u64> {
            caps.get(idx)
                .ok_or_else(invalid)?
                .as_str()
                .parse::<u64>()
                .map_err(|_| invalid())
        };

        let major = number(1)?;
        let minor = number(2)?;
        let patch = number(3)?;

        // Dotted marker lives in groups 4/5, compact in 6/7.
        let marker = caps
            .get(4)
            .map(|m| (m, caps.get(5)))
            .or_else(|| caps.get(6).map(|m| (m, caps.get(7))));

        let prerelease = match marker {
            Some((name, digits)) => {
                let channel = Channel::parse(name.as_str())?;
                let counter = match digits {
                    Some(d) => d.as_str().parse::<u64>().map_err(|_| invalid())?,
                    None => 0,
                };
                Some((channel, counter))
            }
            None => None,
        };

        Ok(VersionParts {
            major,
            minor,
            patch,
            prerelease,
            local: caps.get(8).map(|m| m.as_str().to_string()),
        })
    }

    /// Current channel, if any
    pub fn prerelease_type(&self) -> Option<Channel> {
        self.prerelease.map(|(channel, _)| channel)
    }

    /// Counter within the current channel, if any
    pub fn prerelease_num(&self) -> Option<u64> {
        self.prerelease.map(|(_, counter)| counter)
    }

    pub fn is_final(&self) -> bool {
        self.prerelease.is_none()
    }

    /// The `major.minor.patch` triple
    pub fn core(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionParts {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        VersionParts::parse(s)
    }
}

impl fmt::Display for VersionParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prerelease {
            Some((channel, counter)) => write!(f, "{}", channel.render(&self.core(), counter))?,
            None => write!(f, "{}", self.core())?,
        }
        if let Some(local) = &self.local {
            write!(f, "+{}", local)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_version() {
        let v = VersionParts::parse("1.2.3").unwrap();
        assert_eq!(v, VersionParts::new(1, 2, 3));
        assert_eq!(v.prerelease_type(), None);
        assert_eq!(v.prerelease_num(), None);
    }

    #[test]
    fn test_parse_alpha_compact() {
        let v = VersionParts::parse("1.0.0a0").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 0, 0));
        assert_eq!(v.prerelease_type(), Some(Channel::Alpha));
        assert_eq!(v.prerelease_num(), Some(0));
    }

    #[test]
    fn test_parse_beta_dotted_spelled() {
        let v = VersionParts::parse("2.1.0.beta1").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (2, 1, 0));
        assert_eq!(v.prerelease, Some((Channel::Beta, 1)));
    }

    #[test]
    fn test_parse_dotted_alpha_with_inner_dot() {
        let v = VersionParts::parse("1.0.0.alpha.2").unwrap();
        assert_eq!(v.prerelease, Some((Channel::Alpha, 2)));
    }

    #[test]
    fn test_parse_rc() {
        let v = VersionParts::parse("3.0.0rc2").unwrap();
        assert_eq!(v.prerelease, Some((Channel::ReleaseCandidate, 2)));
    }

    #[test]
    fn test_parse_dev_both_forms() {
        assert_eq!(
            VersionParts::parse("1.0.0.dev0").unwrap().prerelease,
            Some((Channel::Dev, 0))
        );
        assert_eq!(
            VersionParts::parse("1.0.0dev3").unwrap().prerelease,
            Some((Channel::Dev, 3))
        );
    }

    #[test]
    fn test_parse_post_both_forms() {
        assert_eq!(
            VersionParts::parse("1.0.0.post1").unwrap().prerelease,
            Some((Channel::Post, 1))
        );
        let v = VersionParts::parse("2.3.4post5").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (2, 3, 4));
        assert_eq!(v.prerelease, Some((Channel::Post, 5)));
    }

    #[test]
    fn test_parse_missing_counter_defaults_to_zero() {
        assert_eq!(
            VersionParts::parse("1.0.0.beta").unwrap().prerelease,
            Some((Channel::Beta, 0))
        );
        assert_eq!(
            VersionParts::parse("1.0.0rc").unwrap().prerelease,
            Some((Channel::ReleaseCandidate, 0))
        );
    }

    #[test]
    fn test_parse_v_prefix() {
        assert_eq!(
            VersionParts::parse("v1.2.3").unwrap(),
            VersionParts::new(1, 2, 3)
        );
        assert!(VersionParts::parse("vv1.2.3").is_err());
    }

    #[test]
    fn test_parse_local_suffix() {
        let v = VersionParts::parse("1.0.0a1+build.7").unwrap();
        assert_eq!(v.prerelease, Some((Channel::Alpha, 1)));
        assert_eq!(v.local.as_deref(), Some("build.7"));
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "invalid",
            "",
            "1.2",
            "1.2.3.4",
            "1!1.0.0",
            "1.a.0",
            "1.0.0-alpha.1",
            "1.0.0.invalid",
            "1.0.0alpha1",
            "1.0.0a1x",
            "1.0.0+",
            "99999999999999999999.0.0",
        ] {
            let err = VersionParts::parse(input).unwrap_err();
            assert!(err.is_parse_failure(), "{} should fail to parse", input);
        }
    }

    #[test]
    fn test_display_uses_native_rendering() {
        assert_eq!(
            VersionParts::parse("2.1.0.beta1").unwrap().to_string(),
            "2.1.0b1"
        );
        assert_eq!(
            VersionParts::parse("1.0.0dev3").unwrap().to_string(),
            "1.0.0.dev3"
        );
        assert_eq!(
            VersionParts::parse("v1.0.0+local").unwrap().to_string(),
            "1.0.0+local"
        );
    }

    #[test]
    fn test_from_str() {
        let v: VersionParts = "0.9.1rc4".parse().unwrap();
        assert_eq!(v.core(), "0.9.1");
        assert!(!v.is_final());
    }
}
