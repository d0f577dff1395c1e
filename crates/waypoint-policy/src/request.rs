//! Navigation requests as delivered by the page loader

use url::Url;
use uuid::Uuid;

use crate::error::PolicyError;
use crate::Result;

#[derive(Debug, Clone)]
pub struct NavigationRequest {
    /// Correlates log lines for one navigation attempt
    pub id: Uuid,
    /// Raw string as received from the loader
    pub raw: String,
    /// Parsed URL, `None` if the raw string was not a valid URL
    pub url: Option<Url>,
}

impl NavigationRequest {
    pub fn new(url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw: url.to_string(),
            url: Some(url),
        }
    }

    /// Parse a raw URL string. A malformed string yields a request without
    /// a URL, which the policy cancels.
    pub fn parse(raw: &str) -> Self {
        let url = match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!(raw = %raw, error = %e, "Navigation request URL did not parse");
                None
            }
        };

        Self {
            id: Uuid::new_v4(),
            raw: raw.to_string(),
            url,
        }
    }

    /// Request carrying no URL at all
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            raw: String::new(),
            url: None,
        }
    }

    /// Host component of the requested URL.
    pub fn host(&self) -> Result<&str> {
        let url = self
            .url
            .as_ref()
            .ok_or_else(|| PolicyError::MalformedUrl(self.raw.clone()))?;

        url.host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| PolicyError::NoHost(self.raw.clone()))
    }
}
