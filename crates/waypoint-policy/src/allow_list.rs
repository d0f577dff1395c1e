//! Allow-list of trusted domains
//!
//! Entries are matched as plain substrings of the host by default, so a
//! mobile redirect such as `m.example.com` still matches `example.com`.
//! No case folding or punycode conversion happens here.

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::Result;

/// How an allow-list entry is compared against a host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Entry may occur anywhere in the host
    #[default]
    Substring,
    /// Host must equal the entry or be a subdomain of it
    DomainSuffix,
}

impl MatchMode {
    pub fn matches(&self, host: &str, entry: &str) -> bool {
        match self {
            MatchMode::Substring => host.contains(entry),
            MatchMode::DomainSuffix => {
                host == entry
                    || host
                        .strip_suffix(entry)
                        .is_some_and(|prefix| prefix.ends_with('.'))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AllowList {
    entries: Vec<String>,
}

impl AllowList {
    /// Build an allow-list, keeping insertion order.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();

        if entries.is_empty() {
            return Err(PolicyError::EmptyAllowList);
        }

        if let Some(index) = entries.iter().position(|e| e.is_empty()) {
            return Err(PolicyError::EmptyEntry { index });
        }

        Ok(Self { entries })
    }

    /// Entries in presentation order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any entry occurs somewhere in `host`.
    pub fn contains(&self, host: &str) -> bool {
        self.first_match(host).is_some()
    }

    /// First entry, in insertion order, that occurs in `host`.
    pub fn first_match(&self, host: &str) -> Option<&str> {
        self.first_match_with(host, MatchMode::Substring)
    }

    pub fn first_match_with(&self, host: &str, mode: MatchMode) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| mode.matches(host, entry))
            .map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for AllowList {
    type Error = PolicyError;

    fn try_from(entries: Vec<String>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<AllowList> for Vec<String> {
    fn from(list: AllowList) -> Self {
        list.entries
    }
}
