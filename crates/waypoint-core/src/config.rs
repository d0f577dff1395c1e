//! Shell configuration
//!
//! Defaults are compiled in. A host may override any field from a JSON
//! document; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use waypoint_navigation::PageSelector;
use waypoint_policy::{AllowList, MatchMode, NavigationPolicy};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trusted domains, in menu order. The first one is loaded at startup.
    /// Parsed hosts are lowercase ASCII, so entries should be too.
    pub allow_list: Vec<String>,
    /// Scheme prefixed to a chosen entry
    pub scheme: String,
    /// How entries are matched against a host
    pub match_mode: MatchMode,
    /// Title of the page chooser
    pub menu_title: String,
    /// Allow swipe gestures for back/forward navigation
    pub back_forward_gestures: bool,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;

        tracing::info!(path = %path.display(), entries = config.allow_list.len(), "Loaded config");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.build_allow_list()?;

        for entry in self.unmatchable_entries() {
            tracing::warn!(
                entry = %entry,
                "Allow-list entry has uppercase or non-ASCII characters and will never match"
            );
        }

        if self.scheme.is_empty() {
            return Err(CoreError::Config("Scheme cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Entries no parsed host can contain: hosts come out of `url::Url`
    /// lowercased and punycode-encoded.
    pub fn unmatchable_entries(&self) -> Vec<&str> {
        self.allow_list
            .iter()
            .filter(|entry| entry.chars().any(|c| !c.is_ascii() || c.is_ascii_uppercase()))
            .map(String::as_str)
            .collect()
    }

    pub fn build_allow_list(&self) -> Result<AllowList> {
        Ok(AllowList::new(self.allow_list.iter().cloned())?)
    }

    pub fn build_policy(&self) -> Result<NavigationPolicy> {
        Ok(NavigationPolicy::with_match_mode(
            self.build_allow_list()?,
            self.match_mode,
        ))
    }

    pub fn build_selector(&self) -> Result<PageSelector> {
        Ok(PageSelector::new(self.build_allow_list()?)
            .with_scheme(self.scheme.clone())
            .with_menu_title(self.menu_title.clone()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_list: vec!["apple.com".to_string(), "hackingwithswift.com".to_string()],
            scheme: "https".to_string(),
            match_mode: MatchMode::Substring,
            menu_title: "Open page...".to_string(),
            back_forward_gestures: true,
        }
    }
}
