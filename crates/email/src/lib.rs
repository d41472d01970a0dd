// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Notification emails for the marketplace
//!
//! Every template is plain data. [`render`] validates it and produces the
//! subject line, an HTML body wrapped in the shared layout and a plaintext
//! alternative. Rendering performs no network or file I/O: images are
//! referenced by absolute URLs built from [`EmailConfig`].
//!
//! # Templates
//!
//! - [`VerificationCodeEmail`]: one-time sign-in or email confirmation code
//! - [`ActivityEmail`]: trading activity on one NFT, see [`ActivityKind`]
//! - [`EventEmail`]: event registrations, tickets, reminders and invitations

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

pub mod activity;
pub mod event;
pub mod layout;
pub mod verification;

pub use activity::{ActivityEmail, ActivityKind};
pub use event::{EventEmail, EventKind};
pub use layout::{EmailBody, escape_html};
pub use verification::VerificationCodeEmail;

/// Result type alias for rendering
pub type EmailResult<T> = Result<T, EmailError>;

/// Errors raised while rendering an email
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum EmailError {
    /// Template data failed validation
    #[error("Invalid {template} payload: {message}")]
    InvalidPayload {
        template: &'static str,
        message: String,
    },
}

impl EmailError {
    /// Create an invalid payload error for `template`
    pub fn invalid_payload<T: ToString>(template: &'static str, message: T) -> Self {
        Self::InvalidPayload {
            template,
            message: message.to_string(),
        }
    }
}

/// Branding and links shared by every template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    /// Name shown in headers and footers
    pub brand_name: String,
    /// Marketplace website, target of every call to action
    pub site_url: Url,
    /// Base URL of hosted email images
    pub asset_base_url: Url,
    /// Block explorer used for transaction links
    pub explorer_url: Url,
    /// Reply address shown in the footer
    pub support_email: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            brand_name: "XOXNO".to_string(),
            site_url: Url::parse("https://xoxno.com").expect("static URL"),
            asset_base_url: Url::parse("https://media.xoxno.com/emails").expect("static URL"),
            explorer_url: Url::parse("https://explorer.multiversx.com").expect("static URL"),
            support_email: "support@xoxno.com".to_string(),
        }
    }
}

fn join(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl EmailConfig {
    /// Absolute URL of a hosted image
    pub fn asset(&self, path: &str) -> String {
        join(&self.asset_base_url, path)
    }

    /// Absolute URL of a page on the marketplace website
    pub fn page(&self, path: &str) -> String {
        join(&self.site_url, path)
    }

    /// Explorer page of a transaction
    pub fn transaction(&self, hash: &str) -> String {
        join(&self.explorer_url, &format!("transactions/{hash}"))
    }
}

/// Rendered email ready to hand to a mail transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    #[allow(missing_docs)]
    pub subject: String,
    #[allow(missing_docs)]
    pub html: String,
    /// Plaintext alternative
    pub text: String,
}

/// Data that can be rendered into an email
pub trait EmailTemplate {
    /// Template name used in errors and logs
    fn name(&self) -> &'static str;

    /// Reject payloads that cannot produce a meaningful email
    fn validate(&self) -> EmailResult<()>;

    /// Subject line, unescaped
    fn subject(&self, config: &EmailConfig) -> String;

    /// Content placed inside the shared layout
    fn body(&self, config: &EmailConfig) -> EmailBody;
}

/// Validate `template` and render it with `config`
#[instrument(skip_all, fields(template = template.name()))]
pub fn render<T: EmailTemplate + ?Sized>(
    template: &T,
    config: &EmailConfig,
) -> EmailResult<RenderedEmail> {
    template.validate()?;

    let subject = template.subject(config);
    let body = template.body(config);
    let rendered = RenderedEmail {
        html: body.to_html(&subject, config),
        text: body.to_text(config),
        subject,
    };
    debug!(
        html_bytes = rendered.html.len(),
        text_bytes = rendered.text.len(),
        "Rendered email"
    );
    Ok(rendered)
}

pub(crate) fn require(template: &'static str, field: &str, value: &str) -> EmailResult<()> {
    if value.trim().is_empty() {
        return Err(EmailError::invalid_payload(
            template,
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}
