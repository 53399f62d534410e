//! Contact form rules: validation, in-flight guard, rate limiting

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::time::Instant;

use crate::config::RateLimit;
use crate::content::ContactMessage;
use crate::error::ValidationError;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern is valid"));

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_SUBJECT_CHARS: usize = 5;
pub const MIN_MESSAGE_CHARS: usize = 10;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

fn too_short(value: &str, min: usize) -> bool {
    value.trim().chars().count() < min
}

/// Check every rule and report all failures together
pub fn validate(message: &ContactMessage) -> Result<(), ValidationError> {
    let mut problems = Vec::new();

    if too_short(&message.name, MIN_NAME_CHARS) {
        problems.push("Name is required and must be at least 2 characters.".to_string());
    }
    if !is_valid_email(&message.email) {
        problems.push("A valid email address is required.".to_string());
    }
    if too_short(&message.subject, MIN_SUBJECT_CHARS) {
        problems.push("Subject is required and must be at least 5 characters.".to_string());
    }
    if too_short(&message.message, MIN_MESSAGE_CHARS) {
        problems.push("Message is required and must be at least 10 characters.".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { problems })
    }
}

/// One-at-a-time flag for a UI action (form submission, load more)
#[derive(Debug, Default)]
pub struct SubmissionLock {
    in_flight: AtomicBool,
}

impl SubmissionLock {
    /// Claim the lock; `None` while another submission holds it
    pub fn try_acquire(&self) -> Option<SubmissionGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard { lock: self })
    }

    pub fn is_held(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Releases the submission lock when dropped
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    lock: &'a SubmissionLock,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.lock.in_flight.store(false, Ordering::Release);
    }
}

/// Sliding-window attempt counter keyed by sender
#[derive(Debug)]
pub struct RateLimiter {
    limit: RateLimit,
    attempts: HashMap<String, Vec<Instant>>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self { limit, attempts: HashMap::new() }
    }

    /// Record an attempt for `key`; false when the window is already full
    pub fn check(&mut self, key: &str) -> bool {
        let now = Instant::now();
        let window = self.limit.window;
        self.attempts.retain(|_, recent| {
            recent.retain(|at| now.duration_since(*at) < window);
            !recent.is_empty()
        });

        let recent = self.attempts.entry(key.trim().to_lowercase()).or_default();

        if recent.len() >= self.limit.max_attempts {
            return false;
        }
        recent.push(now);
        true
    }

    /// Number of senders with attempts inside the current window
    pub fn tracked_senders(&self) -> usize {
        self.attempts.len()
    }
}
