//! Configuration options for the content client and controller

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "PORTFOLIO_API_URL";

/// Environment variable holding the request timeout in seconds
pub const API_TIMEOUT_ENV: &str = "PORTFOLIO_API_TIMEOUT_SECS";

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Logical backend resources and their path suffixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Profile,
    Skills,
    Projects,
    Experience,
    Contact,
    SendMessage,
}

impl Resource {
    /// Every resource, in the order the endpoint table lists them
    pub const ALL: [Resource; 6] = [
        Resource::Profile,
        Resource::Skills,
        Resource::Projects,
        Resource::Experience,
        Resource::Contact,
        Resource::SendMessage,
    ];

    /// Path suffix used by the reference backend
    pub fn default_path(self) -> &'static str {
        match self {
            Resource::Profile => "/profile",
            Resource::Skills => "/skills",
            Resource::Projects => "/projects",
            Resource::Experience => "/experience",
            Resource::Contact => "/contact",
            Resource::SendMessage => "/contact/send",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Skills => "skills",
            Resource::Projects => "projects",
            Resource::Experience => "experience",
            Resource::Contact => "contact",
            Resource::SendMessage => "send message",
        }
    }
}

/// Configuration options for the content client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The backend base URL, without a trailing slash
    pub base_url: String,

    /// Path suffix per logical resource
    pub endpoints: HashMap<Resource, String>,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Value of the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: Resource::ALL
                .iter()
                .map(|r| (*r, r.default_path().to_string()))
                .collect(),
            request_timeout: Some(Duration::from_secs(10)),
            client_info: format!("portfolio-content/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Options pointing at the given base URL, everything else default
    pub fn new(base_url: &str) -> Result<Self> {
        Self::default().with_base_url(base_url)
    }

    /// Read `PORTFOLIO_API_URL` and `PORTFOLIO_API_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(API_URL_ENV)
            .map_err(|_| Error::config(format!("{} environment variable not found", API_URL_ENV)))?;
        let mut options = Self::new(&base_url)?;

        if let Ok(raw) = env::var(API_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a whole number of seconds, got {:?}", API_TIMEOUT_ENV, raw))
            })?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Ok(options)
    }

    /// Set the base URL; it must parse as an absolute http(s) URL
    pub fn with_base_url(mut self, value: &str) -> Result<Self> {
        let parsed = Url::parse(value)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base URL must use http or https, got {}",
                parsed.scheme()
            )));
        }
        self.base_url = value.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Override the path of one resource
    pub fn with_endpoint(mut self, resource: Resource, path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        self.endpoints.insert(resource, path);
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the `X-Client-Info` header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Path suffix configured for a resource
    pub fn endpoint(&self, resource: Resource) -> &str {
        self.endpoints
            .get(&resource)
            .map(String::as_str)
            .unwrap_or_else(|| resource.default_path())
    }

    /// Full URL of a resource
    pub fn url_for(&self, resource: Resource) -> String {
        format!("{}{}", self.base_url, self.endpoint(resource))
    }
}

/// Sliding-window limit on contact form submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_attempts: usize,
    pub window: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            window: Duration::from_secs(60),
        }
    }
}

/// Options for the page controller
#[derive(Debug, Clone)]
pub struct PortfolioOptions {
    /// How many projects the first load asks for
    pub initial_project_limit: u32,

    /// Submission limit per sender email; `None` disables it
    pub submission_rate_limit: Option<RateLimit>,
}

impl Default for PortfolioOptions {
    fn default() -> Self {
        Self {
            initial_project_limit: 6,
            submission_rate_limit: Some(RateLimit::default()),
        }
    }
}

impl PortfolioOptions {
    /// Set the number of projects requested at startup
    pub fn with_initial_project_limit(mut self, value: u32) -> Self {
        self.initial_project_limit = value;
        self
    }

    /// Set or disable the submission rate limit
    pub fn with_submission_rate_limit(mut self, value: Option<RateLimit>) -> Self {
        self.submission_rate_limit = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let options = ClientOptions::default();
        assert_eq!(options.url_for(Resource::Profile), "http://localhost:3000/api/profile");
        assert_eq!(options.url_for(Resource::SendMessage), "http://localhost:3000/api/contact/send");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let options = ClientOptions::new("https://api.example.com/v1/").unwrap();
        assert_eq!(options.url_for(Resource::Skills), "https://api.example.com/v1/skills");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(ClientOptions::new("ftp://example.com").is_err());
        assert!(ClientOptions::new("not a url").is_err());
    }

    #[test]
    fn test_endpoint_override_adds_leading_slash() {
        let options = ClientOptions::default().with_endpoint(Resource::Projects, "work");
        assert_eq!(options.endpoint(Resource::Projects), "/work");
    }
}
