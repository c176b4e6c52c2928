//! Version selectors: release channels and literal versions.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Named release channel, embedded verbatim in the download path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Most recent release.
    Latest,
    /// Stable channel.
    Stable,
    /// Preview channel.
    Preview,
    /// Release-candidate channel.
    Rc,
}

impl Channel {
    /// Keyword form of the channel.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Stable => "stable",
            Self::Preview => "preview",
            Self::Rc => "rc",
        }
    }

    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "latest" => Some(Self::Latest),
            "stable" => Some(Self::Stable),
            "preview" => Some(Self::Preview),
            "rc" => Some(Self::Rc),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to download: a channel keyword passed through unmodified, or a
/// literal version number canonicalized to a single `v`-prefixed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// A release channel (`latest`, `stable`, `preview`, `rc`).
    Channel(Channel),
    /// A literal version, stored without the `v` marker.
    Version(String),
}

impl VersionSelector {
    /// Parse user input. Channel keywords are recognized exactly; anything
    /// else is a literal version, with at most one leading `v` stripped so
    /// `1.2.3` and `v1.2.3` canonicalize identically.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match Channel::from_keyword(trimmed) {
            Some(channel) => Self::Channel(channel),
            None => {
                let literal = trimmed.strip_prefix('v').unwrap_or(trimmed);
                Self::Version(literal.to_string())
            }
        }
    }

    /// The URL path segment for this selector: the bare keyword for a
    /// channel, `v{version}` for a literal.
    pub fn path_segment(&self) -> String {
        match self {
            Self::Channel(channel) => channel.as_str().to_string(),
            Self::Version(version) => format!("v{version}"),
        }
    }
}

impl FromStr for VersionSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_keywords_pass_through() {
        for keyword in ["latest", "stable", "preview", "rc"] {
            let selector = VersionSelector::parse(keyword);
            assert!(matches!(selector, VersionSelector::Channel(_)));
            assert_eq!(selector.path_segment(), keyword);
        }
    }

    #[test]
    fn literal_versions_gain_the_v_marker() {
        assert_eq!(VersionSelector::parse("1.2.3").path_segment(), "v1.2.3");
        assert_eq!(VersionSelector::parse("1.1290.0").path_segment(), "v1.1290.0");
    }

    #[test]
    fn already_prefixed_versions_are_not_doubled() {
        assert_eq!(VersionSelector::parse("v1.2.3").path_segment(), "v1.2.3");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(VersionSelector::parse(" latest "), VersionSelector::Channel(Channel::Latest));
        assert_eq!(VersionSelector::parse(" 1.2.3\n").path_segment(), "v1.2.3");
    }

    #[test]
    fn keywords_are_case_sensitive() {
        // "Latest" is not a channel keyword; it canonicalizes as a literal.
        let selector = VersionSelector::parse("Latest");
        assert!(matches!(selector, VersionSelector::Version(_)));
    }
}
