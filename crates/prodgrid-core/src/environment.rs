//! Authoring vs. published environment signal.
//!
//! Decided once per render invocation and passed explicitly to the fetch and
//! card-building stages.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Content-management preview/edit context.
    Author,
    /// Published, live site.
    #[default]
    Publish,
}

impl Environment {
    #[must_use]
    pub fn is_author(self) -> bool {
        matches!(self, Environment::Author)
    }

    /// Classifies a page host: any host containing `author` is the authoring
    /// tier (`author-p123-e456.adobeaemcloud.com`), everything else is published.
    #[must_use]
    pub fn detect_from_host(host: &str) -> Self {
        if host.to_ascii_lowercase().contains("author") {
            Environment::Author
        } else {
            Environment::Publish
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Author => write!(f, "author"),
            Environment::Publish => write!(f, "publish"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => Ok(Environment::Author),
            "publish" => Ok(Environment::Publish),
            other => Err(format!("expected \"author\" or \"publish\", got \"{other}\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_author_host() {
        assert_eq!(
            Environment::detect_from_host("author-p1234-e5678.adobeaemcloud.com"),
            Environment::Author
        );
    }

    #[test]
    fn detects_author_host_case_insensitively() {
        assert_eq!(
            Environment::detect_from_host("AUTHOR.example.com"),
            Environment::Author
        );
    }

    #[test]
    fn other_hosts_are_publish() {
        assert_eq!(
            Environment::detect_from_host("main--site--org.aem.live"),
            Environment::Publish
        );
        assert_eq!(Environment::detect_from_host(""), Environment::Publish);
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("author".parse::<Environment>(), Ok(Environment::Author));
        assert_eq!(" Publish ".parse::<Environment>(), Ok(Environment::Publish));
        assert!("preview".parse::<Environment>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for env in [Environment::Author, Environment::Publish] {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }
}
