//! Page orchestration: startup loads, load-more and the contact form

pub mod form;

use std::sync::Arc;

use chrono::Datelike;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::{ClientOptions, PortfolioOptions};
use crate::content::{ContactMessage, ContentClient, ContentSource, MessageReceipt, Origin, ProjectLimit};
use crate::error::{Error, NetworkError, ValidationError};
use crate::render::{
    ContentRenderer, Notice, Page, Region, CONTACT_REGIONS, EXPERIENCE_REGIONS, LOADING_CLASS,
    PROFILE_REGIONS, PROJECT_REGIONS, SKILL_REGIONS,
};

use form::{RateLimiter, SubmissionLock};

pub const SUCCESS_NOTICE: &str = "Message sent successfully! Thank you for reaching out.";
pub const GENERIC_FAILURE_NOTICE: &str = "Failed to send message. Please try again.";
pub const RATE_LIMITED_NOTICE: &str = "Too many messages sent. Please wait a minute before trying again.";
pub const LOAD_MORE_LABEL: &str = "View All Projects";
pub const LOADING_LABEL: &str = "Loading...";

/// Visitor interactions the controller responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    LoadMoreProjects,
    SubmitContact,
    ClickLink { region: Region, index: usize },
}

/// Where each startup load got its content from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub profile: Origin,
    pub skills: Origin,
    pub projects: Origin,
    pub experience: Origin,
    pub contact: Origin,
}

impl LoadReport {
    /// Number of loads that fell back to static content
    pub fn fallback_count(&self) -> usize {
        [&self.profile, &self.skills, &self.projects, &self.experience, &self.contact]
            .iter()
            .filter(|o| matches!(o, Origin::Fallback(_)))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was in flight
    Ignored,
    /// Rejected locally; no request was made
    Invalid(ValidationError),
    /// Too many attempts from this sender
    RateLimited,
    Sent(MessageReceipt),
    Failed(NetworkError),
}

/// Result of dispatching a [`UiEvent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// `None` when the trigger was busy or already hidden
    Projects(Option<Origin>),
    Submit(SubmitOutcome),
    Navigated(Option<String>),
}

/// Drives the page: loads content, renders it, reacts to events
pub struct PortfolioController<S = ContentClient> {
    source: S,
    options: PortfolioOptions,
    page: Arc<Mutex<Page>>,
    renderer: ContentRenderer,
    submission: SubmissionLock,
    load_more: SubmissionLock,
    rate_limiter: Option<std::sync::Mutex<RateLimiter>>,
}

impl PortfolioController<ContentClient> {
    /// Controller over a fresh page backed by the HTTP content client
    pub fn connect(client: ClientOptions, options: PortfolioOptions) -> Result<Self, Error> {
        Ok(Self::new(ContentClient::new(client)?, Page::new(), options))
    }
}

impl<S: ContentSource> PortfolioController<S> {
    /// Bind to the page's regions; nothing is loaded until [`start`](Self::start)
    pub fn new(source: S, page: Page, options: PortfolioOptions) -> Self {
        let renderer = ContentRenderer::bind(&page);
        let rate_limiter = options
            .submission_rate_limit
            .map(|limit| std::sync::Mutex::new(RateLimiter::new(limit)));

        Self {
            source,
            options,
            page: Arc::new(Mutex::new(page)),
            renderer,
            submission: SubmissionLock::default(),
            load_more: SubmissionLock::default(),
            rate_limiter,
        }
    }

    /// The content source loads go through
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Shared handle to the page, for inspection and form input
    pub fn page(&self) -> Arc<Mutex<Page>> {
        Arc::clone(&self.page)
    }

    /// Render the footer, then run the five content loads concurrently.
    ///
    /// Each load renders as soon as it resolves; a slow or failed load
    /// never holds up the others.
    pub async fn start(&self) -> LoadReport {
        {
            let mut page = self.page.lock().await;
            self.renderer.render_footer_year(&mut page, chrono::Local::now().year());
            for regions in [PROFILE_REGIONS, SKILL_REGIONS, PROJECT_REGIONS, EXPERIENCE_REGIONS, CONTACT_REGIONS] {
                self.renderer.set_loading(&mut page, regions, true);
            }
        }

        let (profile, skills, projects, experience, contact) = tokio::join!(
            self.load_profile(),
            self.load_skills(),
            self.load_projects(ProjectLimit::Capped(self.options.initial_project_limit)),
            self.load_experience(),
            self.load_contact_info(),
        );

        let report = LoadReport { profile, skills, projects, experience, contact };
        info!("Startup content loaded ({} of 5 from fallback)", report.fallback_count());
        report
    }

    /// Fetch and render the profile, about and personal details
    pub async fn load_profile(&self) -> Origin {
        let content = self.source.profile().await;
        let mut page = self.page.lock().await;
        self.renderer.render_profile(&mut page, &content.data);
        self.renderer.set_loading(&mut page, PROFILE_REGIONS, false);
        content.origin
    }

    /// Fetch and render the three skill groups
    pub async fn load_skills(&self) -> Origin {
        let content = self.source.skills().await;
        let mut page = self.page.lock().await;
        self.renderer.render_skills(&mut page, &content.data);
        self.renderer.set_loading(&mut page, SKILL_REGIONS, false);
        content.origin
    }

    /// Fetch and render up to `limit` projects
    pub async fn load_projects(&self, limit: ProjectLimit) -> Origin {
        let content = self.source.projects(limit).await;
        let mut page = self.page.lock().await;
        self.renderer.render_projects(&mut page, &content.data);
        self.renderer.set_loading(&mut page, PROJECT_REGIONS, false);
        content.origin
    }

    /// Fetch and render the timeline
    pub async fn load_experience(&self) -> Origin {
        let content = self.source.experience().await;
        let mut page = self.page.lock().await;
        self.renderer.render_experience(&mut page, &content.data);
        self.renderer.set_loading(&mut page, EXPERIENCE_REGIONS, false);
        content.origin
    }

    /// Fetch and render contact details, social links and the resume link
    pub async fn load_contact_info(&self) -> Origin {
        let content = self.source.contact_info().await;
        let mut page = self.page.lock().await;
        self.renderer.render_contact_info(&mut page, &content.data);
        self.renderer.set_loading(&mut page, CONTACT_REGIONS, false);
        content.origin
    }

    /// Dispatch one visitor interaction
    pub async fn handle(&self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::LoadMoreProjects => EventOutcome::Projects(self.load_all_projects().await),
            UiEvent::SubmitContact => EventOutcome::Submit(self.submit_contact().await),
            UiEvent::ClickLink { region, index } => {
                EventOutcome::Navigated(self.page.lock().await.click_link(region, index))
            }
        }
    }

    /// Replace the capped project list with the full one.
    ///
    /// The trigger is disabled while the request runs and further calls
    /// return `None` until it finishes. After a live load it is hidden; after
    /// a fallback it comes back so the visitor can retry.
    pub async fn load_all_projects(&self) -> Option<Origin> {
        let _guard = self.load_more.try_acquire()?;
        {
            let mut page = self.page.lock().await;
            if page.element(Region::LoadMoreProjects).map_or(false, |el| el.hidden) {
                return None;
            }
            page.set_text(Region::LoadMoreProjects, LOADING_LABEL);
            page.set_disabled(Region::LoadMoreProjects, true);
        }

        let origin = self.load_projects(ProjectLimit::All).await;

        let mut page = self.page.lock().await;
        page.set_text(Region::LoadMoreProjects, LOAD_MORE_LABEL);
        page.set_disabled(Region::LoadMoreProjects, false);
        if origin == Origin::Live {
            page.set_hidden(Region::LoadMoreProjects, true);
        }
        Some(origin)
    }

    /// Read the form fields from the page
    pub async fn form_values(&self) -> ContactMessage {
        let page = self.page.lock().await;
        ContactMessage {
            name: page.value(Region::FormName).to_string(),
            email: page.value(Region::FormEmail).to_string(),
            subject: page.value(Region::FormSubject).to_string(),
            message: page.value(Region::FormMessage).to_string(),
        }
    }

    /// Fill the form fields, as a visitor typing would
    pub async fn fill_form(&self, message: &ContactMessage) {
        let mut page = self.page.lock().await;
        page.set_value(Region::FormName, &message.name);
        page.set_value(Region::FormEmail, &message.email);
        page.set_value(Region::FormSubject, &message.subject);
        page.set_value(Region::FormMessage, &message.message);
    }

    /// Validate and send the contact form.
    ///
    /// While a submission is in flight further calls return
    /// [`SubmitOutcome::Ignored`] without touching the page.
    pub async fn submit_contact(&self) -> SubmitOutcome {
        let Some(_guard) = self.submission.try_acquire() else {
            return SubmitOutcome::Ignored;
        };

        let message = self.form_values().await;

        if let Err(err) = form::validate(&message) {
            self.notify(Notice::error(err.to_string())).await;
            return SubmitOutcome::Invalid(err);
        }

        if !self.allow_attempt(&message.email) {
            warn!("Contact form rate limit reached for {}", message.email.trim());
            self.notify(Notice::error(RATE_LIMITED_NOTICE)).await;
            return SubmitOutcome::RateLimited;
        }

        self.set_submitting(true).await;
        let result = self.source.send_message(&message).await;

        let mut page = self.page.lock().await;
        set_submitting(&mut page, false);
        match result {
            Ok(receipt) => {
                info!("Contact message accepted (id {:?})", receipt.id);
                show_notice(&mut page, Notice::success(SUCCESS_NOTICE));
                for field in [Region::FormName, Region::FormEmail, Region::FormSubject, Region::FormMessage] {
                    page.set_value(field, "");
                }
                SubmitOutcome::Sent(receipt)
            }
            Err(err) => {
                warn!("Contact message rejected: {}", err);
                let text = err.detail.clone().unwrap_or_else(|| GENERIC_FAILURE_NOTICE.to_string());
                show_notice(&mut page, Notice::error(text));
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn allow_attempt(&self, email: &str) -> bool {
        match &self.rate_limiter {
            Some(limiter) => match limiter.lock() {
                Ok(mut limiter) => limiter.check(email),
                Err(poisoned) => poisoned.into_inner().check(email),
            },
            None => true,
        }
    }

    async fn notify(&self, notice: Notice) {
        show_notice(&mut *self.page.lock().await, notice);
    }

    async fn set_submitting(&self, submitting: bool) {
        set_submitting(&mut *self.page.lock().await, submitting);
    }
}

/// The form shows one notice at a time; a new one replaces the last
fn show_notice(page: &mut Page, notice: Notice) {
    page.dismiss_notices(Region::ContactForm);
    page.push_notice(Region::ContactForm, notice);
}

fn set_submitting(page: &mut Page, submitting: bool) {
    if submitting {
        page.add_class(Region::ContactForm, LOADING_CLASS);
    } else {
        page.remove_class(Region::ContactForm, LOADING_CLASS);
    }
    page.set_disabled(Region::SubmitButton, submitting);
}
