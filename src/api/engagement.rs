//! Reader engagement facade: newsletter, contact form, and view tracking.

use super::error::ApiError;
use super::models::{ContactForm, NewsletterSubscription};
use super::validation::{is_valid_email, validate_contact, validate_subscription};
use super::EngagementGateway;

/// Validates reader submissions before handing them to a gateway.
pub struct Engagement<'client, Gateway>
where
    Gateway: EngagementGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> Engagement<'client, Gateway>
where
    Gateway: EngagementGateway,
{
    /// Creates a facade over the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Subscribes to the newsletter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for malformed addresses; otherwise
    /// propagates gateway failures.
    pub async fn subscribe(&self, subscription: &NewsletterSubscription) -> Result<(), ApiError> {
        validate_subscription(subscription)?;
        self.client.subscribe_newsletter(subscription).await
    }

    /// Unsubscribes from the newsletter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for malformed addresses; otherwise
    /// propagates gateway failures.
    pub async fn unsubscribe(&self, email: &str) -> Result<(), ApiError> {
        if !is_valid_email(email) {
            return Err(ApiError::Validation {
                errors: vec!["A valid email address is required".to_owned()],
            });
        }
        self.client.unsubscribe_newsletter(email.trim()).await
    }

    /// Sends a contact form.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] listing missing fields; otherwise
    /// propagates gateway failures.
    pub async fn contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        validate_contact(form)?;
        self.client.submit_contact(form).await
    }

    /// Records an article view.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn track_view(&self, article_id: &str) -> Result<(), ApiError> {
        self.client.track_article_view(article_id).await
    }
}
