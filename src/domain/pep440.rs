//! PEP 440 acceptance check
//!
//! A full implementation of the PEP 440 version grammar, used only to decide
//! whether a string is a valid Python package version. It is deliberately
//! broader than the engine grammar in [`crate::domain::version`]: epochs, any
//! number of release segments, every alternate pre/post/dev spelling and the
//! `-_.` separators are accepted here, but none of them can be bumped.
//!
//! See <https://peps.python.org/pep-0440/#appendix-b-parsing-version-strings-with-regular-expressions>

use crate::error::{BumpError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static PEP440_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*v?",
        r"(?:(?P<epoch>[0-9]+)!)?",
        r"(?P<release>[0-9]+(?:\.[0-9]+)*)",
        r"(?:[-_.]?(?P<pre_l>alpha|beta|preview|pre|rc|a|b|c)[-_.]?(?P<pre_n>[0-9]+)?)?",
        r"(?:-(?P<post_n1>[0-9]+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?)?",
        r"(?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?",
        r"(?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?",
        r"\s*$",
    ))
    .expect("PEP 440 pattern is valid")
});

/// A version parsed under the full PEP 440 grammar, kept in normalized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pep440Version {
    pub epoch: u64,
    pub release: Vec<u64>,
    /// Normalized pre-release label (`a`, `b`, `rc`) and number
    pub pre: Option<(String, u64)>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
    /// Lowercased local label with `.` separators
    pub local: Option<String>,
}

impl Pep440Version {
    /// Parse a version string under the full PEP 440 grammar.
    ///
    /// # Example
    /// ```
    /// use bump_version::domain::Pep440Version;
    ///
    /// let v = Pep440Version::parse("1.0.0-alpha.1").unwrap();
    /// assert_eq!(v.to_string(), "1.0.0a1");
    /// assert!(Pep440Version::parse("1.0.0..dev1").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || BumpError::invalid_version(input);
        let caps = PEP440_RE.captures(input).ok_or_else(invalid)?;

        let number = |name: &str| -> Result<Option<u64>> {
            caps.name(name)
                .map(|m| m.as_str().parse::<u64>().map_err(|_| invalid()))
                .transpose()
        };

        let epoch = number("epoch")?.unwrap_or(0);

        let release = caps
            .name("release")
            .ok_or_else(invalid)?
            .as_str()
            .split('.')
            .map(|segment| segment.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => Some((
                normalize_pre_label(label.as_str()),
                number("pre_n")?.unwrap_or(0),
            )),
            None => None,
        };

        let post = if caps.name("post_n1").is_some() {
            number("post_n1")?
        } else if caps.name("post_l").is_some() {
            Some(number("post_n2")?.unwrap_or(0))
        } else {
            None
        };

        let dev = match caps.name("dev_l") {
            Some(_) => Some(number("dev_n")?.unwrap_or(0)),
            None => None,
        };

        let local = caps
            .name("local")
            .map(|m| m.as_str().to_lowercase().replace(['-', '_'], "."));

        Ok(Pep440Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }
}

fn normalize_pre_label(label: &str) -> String {
    match label.to_lowercase().as_str() {
        "alpha" | "a" => "a".to_string(),
        "beta" | "b" => "b".to_string(),
        _ => "rc".to_string(),
    }
}

impl fmt::Display for Pep440Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((label, n)) = &self.pre {
            write!(f, "{}{}", label, n)?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{}", local)?;
        }
        Ok(())
    }
}

/// Whether `version` is a valid PEP 440 version.
pub fn validate(version: &str) -> bool {
    let valid = Pep440Version::parse(version).is_ok();
    tracing::debug!(version, valid, "checked PEP 440 compliance");
    valid
}
