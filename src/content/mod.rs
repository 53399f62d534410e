//! Backend content client with static fallbacks

pub mod fallback;
mod types;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientOptions, Resource};
use crate::error::{Error, NetworkError};
use crate::fetch::FetchBuilder;

pub use types::*;

/// Where a piece of content came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Parsed from a successful backend response
    Live,
    /// Substituted from the fallback data set after the request failed
    Fallback(NetworkError),
}

/// Content tagged with its origin
#[derive(Debug, Clone, PartialEq)]
pub struct Content<T> {
    pub data: T,
    pub origin: Origin,
}

impl<T> Content<T> {
    /// Content served by the backend
    pub fn live(data: T) -> Self {
        Self { data, origin: Origin::Live }
    }

    /// Static content substituted after `error`
    pub fn fallback(data: T, error: NetworkError) -> Self {
        Self { data, origin: Origin::Fallback(error) }
    }

    /// Whether the backend answered
    pub fn is_live(&self) -> bool {
        matches!(self.origin, Origin::Live)
    }

    /// Whether static content was substituted
    pub fn is_fallback(&self) -> bool {
        !self.is_live()
    }

    /// The error that caused the fallback, if any
    pub fn error(&self) -> Option<&NetworkError> {
        match &self.origin {
            Origin::Live => None,
            Origin::Fallback(err) => Some(err),
        }
    }

    /// Drop the origin tag
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Transform the data, keeping the origin
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Content<U> {
        Content { data: f(self.data), origin: self.origin }
    }
}

/// How many projects to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLimit {
    /// Ask the backend for at most `n` projects
    Capped(u32),
    /// No limit parameter at all
    All,
}

impl ProjectLimit {
    /// The value of the `limit` query parameter, if one should be sent
    pub fn query_value(self) -> Option<u32> {
        match self {
            ProjectLimit::Capped(n) if n > 0 => Some(n),
            _ => None,
        }
    }
}

impl From<u32> for ProjectLimit {
    fn from(value: u32) -> Self {
        ProjectLimit::Capped(value)
    }
}

impl From<Option<u32>> for ProjectLimit {
    fn from(value: Option<u32>) -> Self {
        value.map_or(ProjectLimit::All, ProjectLimit::Capped)
    }
}

/// Operations the page controller needs from a content backend
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn profile(&self) -> Content<Profile>;
    async fn skills(&self) -> Content<SkillSet>;
    async fn projects(&self, limit: ProjectLimit) -> Content<Vec<Project>>;
    async fn experience(&self) -> Content<Vec<ExperienceEntry>>;
    async fn contact_info(&self) -> Content<ContactInfo>;
    async fn send_message(&self, message: &ContactMessage) -> Result<MessageReceipt, NetworkError>;
}

/// Client for the portfolio backend
#[derive(Debug, Clone)]
pub struct ContentClient {
    options: ClientOptions,
    client: Client,
}

impl ContentClient {
    /// Create a client with its own connection pool
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_http_client(options, client))
    }

    /// Create a client sharing an existing `reqwest::Client`
    pub fn with_http_client(options: ClientOptions, client: Client) -> Self {
        Self { options, client }
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    fn request(&self, method: Method, path: &str) -> FetchBuilder<'_> {
        let url = format!("{}{}", self.options.base_url, path);
        FetchBuilder::new(&self.client, &url, method)
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
    }

    /// Issue a request against `path` (relative to the base URL).
    ///
    /// Transport failures, timeouts, non-2xx statuses and unparsable bodies
    /// all come back as `NetworkError`.
    pub async fn fetch_json(
        &self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, NetworkError> {
        let mut fetch = self.request(method, path);
        if let Some(body) = body {
            fetch = fetch.json(body)?;
        }
        fetch.execute::<Value>().await
    }

    async fn get_resource<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: Option<(&str, String)>,
    ) -> Result<T, NetworkError> {
        let mut fetch = self.request(Method::GET, self.options.endpoint(resource));
        if let Some((key, value)) = query {
            fetch = fetch.query(key, &value);
        }
        fetch.execute::<T>().await
    }

    async fn load<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: Option<(&str, String)>,
        fallback: impl FnOnce() -> T,
    ) -> Content<T> {
        match self.get_resource::<T>(resource, query).await {
            Ok(data) => {
                debug!("Loaded {} from backend", resource.name());
                Content::live(data)
            }
            Err(err) => {
                warn!("Using fallback {}: {}", resource.name(), err);
                Content::fallback(fallback(), err)
            }
        }
    }

    /// Profile, normalized to the nested shape
    pub async fn get_profile(&self) -> Content<Profile> {
        self.load(Resource::Profile, None, fallback::profile).await
    }

    /// Technical, professional and technology skills
    pub async fn get_skills(&self) -> Content<SkillSet> {
        self.load(Resource::Skills, None, fallback::skills).await
    }

    /// Projects, optionally capped.
    ///
    /// The cap is applied to the fallback list as well so both paths agree.
    pub async fn get_projects(&self, limit: impl Into<ProjectLimit>) -> Content<Vec<Project>> {
        let limit = limit.into();
        let query = limit.query_value().map(|n| ("limit", n.to_string()));
        self.load(Resource::Projects, query, move || {
            let mut projects = fallback::projects();
            if let Some(n) = limit.query_value() {
                projects.truncate(n as usize);
            }
            projects
        })
        .await
    }

    /// Timeline entries in backend order
    pub async fn get_experience(&self) -> Content<Vec<ExperienceEntry>> {
        self.load(Resource::Experience, None, fallback::experience).await
    }

    /// Contact block, social links and resume link
    pub async fn get_contact_info(&self) -> Content<ContactInfo> {
        self.load(Resource::Contact, None, fallback::contact).await
    }

    /// Post a contact message. There is no fallback: failures go to the caller.
    pub async fn send_message(&self, message: &ContactMessage) -> Result<MessageReceipt, NetworkError> {
        let body = self
            .request(Method::POST, self.options.endpoint(Resource::SendMessage))
            .json(message)?
            .execute::<Value>()
            .await?;
        Ok(MessageReceipt::from_body(&body))
    }
}

#[async_trait]
impl ContentSource for ContentClient {
    async fn profile(&self) -> Content<Profile> {
        self.get_profile().await
    }

    async fn skills(&self) -> Content<SkillSet> {
        self.get_skills().await
    }

    async fn projects(&self, limit: ProjectLimit) -> Content<Vec<Project>> {
        self.get_projects(limit).await
    }

    async fn experience(&self) -> Content<Vec<ExperienceEntry>> {
        self.get_experience().await
    }

    async fn contact_info(&self) -> Content<ContactInfo> {
        self.get_contact_info().await
    }

    async fn send_message(&self, message: &ContactMessage) -> Result<MessageReceipt, NetworkError> {
        ContentClient::send_message(self, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_limit_query_value() {
        assert_eq!(ProjectLimit::Capped(6).query_value(), Some(6));
        assert_eq!(ProjectLimit::Capped(0).query_value(), None);
        assert_eq!(ProjectLimit::All.query_value(), None);
        assert_eq!(ProjectLimit::from(None), ProjectLimit::All);
        assert_eq!(ProjectLimit::from(Some(3)), ProjectLimit::Capped(3));
    }

    #[test]
    fn test_content_origin_helpers() {
        let live = Content::live(1);
        assert!(live.is_live());
        assert!(live.error().is_none());

        let fallback = Content::fallback(2, NetworkError::status(500, None)).map(|n| n * 10);
        assert!(fallback.is_fallback());
        assert_eq!(fallback.error().and_then(|e| e.status), Some(500));
        assert_eq!(fallback.into_inner(), 20);
    }
}
