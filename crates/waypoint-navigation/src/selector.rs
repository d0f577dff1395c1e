//! Page selector
//!
//! Offers the allow-list entries as choices and turns the chosen entry into
//! a URL to load. Loading itself is left to the caller.

use url::Url;
use waypoint_policy::AllowList;

use crate::error::NavigationError;
use crate::Result;

const DEFAULT_SCHEME: &str = "https";
const DEFAULT_MENU_TITLE: &str = "Open page...";

#[derive(Debug, Clone)]
pub struct PageSelector {
    allow_list: AllowList,
    scheme: String,
    menu_title: String,
}

impl PageSelector {
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            scheme: DEFAULT_SCHEME.to_string(),
            menu_title: DEFAULT_MENU_TITLE.to_string(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_menu_title(mut self, title: impl Into<String>) -> Self {
        self.menu_title = title.into();
        self
    }

    /// Entries to present, in allow-list order
    pub fn choices(&self) -> &[String] {
        self.allow_list.entries()
    }

    pub fn menu_title(&self) -> &str {
        &self.menu_title
    }

    /// Build the URL for a chosen entry.
    pub fn select(&self, choice: &str) -> Result<Url> {
        let candidate = format!("{}://{}", self.scheme, choice);

        Url::parse(&candidate).map_err(|e| {
            tracing::debug!(choice = %choice, error = %e, "Selection is not a valid URL");
            NavigationError::InvalidSelection(choice.to_string())
        })
    }

    /// URL loaded at startup: the first allow-list entry
    pub fn initial(&self) -> Result<Url> {
        match self.allow_list.entries().first() {
            Some(first) => self.select(first),
            None => Err(NavigationError::InvalidSelection(String::new())),
        }
    }
}
