//! Client-side checks run before anything is sent to the API.
//!
//! Every check runs; failures are collected in order and returned together
//! as [`ApiError::Validation`].

use std::sync::LazyLock;

use regex::Regex;

use super::error::ApiError;
use super::models::{ArticleDraft, ContactForm, NewsletterSubscription};

/// Minimum trimmed title length, in characters.
pub const MIN_TITLE_CHARS: usize = 5;
/// Minimum trimmed excerpt length, in characters.
pub const MIN_EXCERPT_CHARS: usize = 20;
/// Minimum trimmed content length, in characters.
pub const MIN_CONTENT_CHARS: usize = 100;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn finish(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation { errors })
    }
}

/// Returns true when `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email.trim()))
}

/// Checks an article draft.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] listing every failed check.
pub fn validate_article(draft: &ArticleDraft) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if trimmed_len(&draft.title) < MIN_TITLE_CHARS {
        errors.push(format!(
            "Title must be at least {MIN_TITLE_CHARS} characters long"
        ));
    }
    if trimmed_len(&draft.excerpt) < MIN_EXCERPT_CHARS {
        errors.push(format!(
            "Excerpt must be at least {MIN_EXCERPT_CHARS} characters long"
        ));
    }
    if trimmed_len(&draft.content) < MIN_CONTENT_CHARS {
        errors.push(format!(
            "Content must be at least {MIN_CONTENT_CHARS} characters long"
        ));
    }
    if is_blank(&draft.category) {
        errors.push("Category is required".to_owned());
    }
    if is_blank(&draft.author) {
        errors.push("Author is required".to_owned());
    }
    finish(errors)
}

/// Checks a newsletter subscription.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when the address is malformed.
pub fn validate_subscription(subscription: &NewsletterSubscription) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if !is_valid_email(&subscription.email) {
        errors.push("A valid email address is required".to_owned());
    }
    finish(errors)
}

/// Checks a contact form.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] listing every failed check.
pub fn validate_contact(form: &ContactForm) -> Result<(), ApiError> {
    let required = [
        (&form.first_name, "First name is required"),
        (&form.last_name, "Last name is required"),
        (&form.subject, "Subject is required"),
        (&form.message, "Message is required"),
    ];

    let mut errors: Vec<String> = required
        .iter()
        .filter(|(value, _)| is_blank(value))
        .map(|(_, message)| (*message).to_owned())
        .collect();
    if !is_valid_email(&form.email) {
        errors.push("A valid email address is required".to_owned());
    }
    finish(errors)
}
