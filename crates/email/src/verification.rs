// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! One-time verification code

use serde::Deserialize;

use crate::{EmailBody, EmailConfig, EmailError, EmailResult, EmailTemplate};

const TEMPLATE: &str = "verification";

/// Email carrying a one-time code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCodeEmail {
    /// Between 4 and 12 ASCII letters or digits
    pub code: String,
    /// Greets the recipient by name when present
    #[serde(default)]
    pub username: Option<String>,
    /// Validity of the code
    pub expires_in_minutes: u32,
}

impl VerificationCodeEmail {
    #[allow(missing_docs)]
    pub fn new(code: impl Into<String>, expires_in_minutes: u32) -> Self {
        Self {
            code: code.into(),
            username: None,
            expires_in_minutes,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

impl EmailTemplate for VerificationCodeEmail {
    fn name(&self) -> &'static str {
        TEMPLATE
    }

    fn validate(&self) -> EmailResult<()> {
        let valid_length = (4..=12).contains(&self.code.len());
        if !valid_length || !self.code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EmailError::invalid_payload(
                TEMPLATE,
                "code must be 4 to 12 letters or digits",
            ));
        }
        if self.expires_in_minutes == 0 {
            return Err(EmailError::invalid_payload(
                TEMPLATE,
                "expiry must be at least one minute",
            ));
        }
        Ok(())
    }

    fn subject(&self, config: &EmailConfig) -> String {
        format!("{} is your {} verification code", self.code, config.brand_name)
    }

    fn body(&self, config: &EmailConfig) -> EmailBody {
        let greeting = match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("Hi {name},"),
            _ => "Hi,".to_string(),
        };
        let minutes = match self.expires_in_minutes {
            1 => "1 minute".to_string(),
            n => format!("{n} minutes"),
        };

        EmailBody::new(format!("Your verification code is {}", self.code))
            .heading("Confirm your email address")
            .paragraph(greeting)
            .paragraph(format!(
                "Enter the code below on {} to continue.",
                config.brand_name
            ))
            .code(&self.code)
            .note(format!(
                "This code expires in {minutes}. If you did not request it, you can ignore this email."
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;

    #[test]
    fn renders_code_everywhere() {
        let email = VerificationCodeEmail::new("A1B2C3", 10).with_username("alice");
        let rendered = render(&email, &EmailConfig::default()).unwrap();

        assert_eq!(rendered.subject, "A1B2C3 is your XOXNO verification code");
        assert!(rendered.html.contains(">A1B2C3</p>"));
        assert!(rendered.text.contains("Hi alice,"));
        assert!(rendered.text.contains("\n\nA1B2C3\n\n"));
        assert!(rendered.text.contains("expires in 10 minutes"));
    }

    #[test]
    fn username_is_escaped() {
        let email = VerificationCodeEmail::new("1234", 1).with_username("<script>");
        let rendered = render(&email, &EmailConfig::default()).unwrap();
        assert!(!rendered.html.contains("<script>"));
        assert!(rendered.html.contains("Hi &lt;script&gt;,"));
        assert!(rendered.text.contains("expires in 1 minute."));
    }

    #[test]
    fn rejects_bad_codes() {
        for code in ["", "123", "1234567890123", "12 34", "12<4"] {
            let error = render(&VerificationCodeEmail::new(code, 5), &EmailConfig::default())
                .unwrap_err();
            assert!(matches!(error, EmailError::InvalidPayload { template: "verification", .. }));
        }
        assert!(render(&VerificationCodeEmail::new("1234", 0), &EmailConfig::default()).is_err());
    }
}
