//! Portfolio content client and renderer
//!
//! Loads profile, skills, projects, experience and contact details from a
//! portfolio REST API, falls back to bundled static content when the API is
//! unreachable, and renders everything into an in-memory page of named
//! regions. The controller also drives the "load more projects" trigger and
//! the contact form.
//!
//! ```no_run
//! use portfolio_content::prelude::*;
//!
//! # async fn run() -> Result<(), Error> {
//! let controller = PortfolioController::connect(ClientOptions::from_env()?, PortfolioOptions::default())?;
//! let report = controller.start().await;
//! println!("{} resources served from fallback", report.fallback_count());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod render;

pub mod prelude {
    pub use crate::config::{ClientOptions, PortfolioOptions, RateLimit, Resource};
    pub use crate::content::{Content, ContentClient, ContentSource, Origin, ProjectLimit};
    pub use crate::controller::{EventOutcome, LoadReport, PortfolioController, SubmitOutcome, UiEvent};
    pub use crate::error::{Error, NetworkError, ValidationError};
    pub use crate::render::{ContentRenderer, Page, Region};
}
