// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Event registrations, tickets, reminders and invitations

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use crate::{EmailBody, EmailConfig, EmailError, EmailResult, EmailTemplate, require};

const TEMPLATE: &str = "event";

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Registration,
    Ticket,
    Reminder,
    Invitation,
}

/// Email about an event the recipient is attending or invited to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEmail {
    #[allow(missing_docs)]
    pub kind: EventKind,
    #[serde(default)]
    #[allow(missing_docs)]
    pub recipient_name: Option<String>,
    #[allow(missing_docs)]
    pub event_id: String,
    #[allow(missing_docs)]
    pub event_name: String,
    /// Organiser, named in invitations
    #[serde(default)]
    pub host_name: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub location: Option<String>,
    #[allow(missing_docs)]
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub end_time: Option<DateTime<Utc>>,
    /// Ticket type, required for ticket emails
    #[serde(default)]
    pub ticket_name: Option<String>,
    /// Check-in code image
    #[serde(default)]
    pub qr_code_url: Option<Url>,
}

fn when(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    let start_text = start.format("%A, %B %-d, %Y at %H:%M UTC").to_string();
    match end {
        Some(end) if end.date_naive() == start.date_naive() => {
            format!("{start_text} to {}", end.format("%H:%M UTC"))
        }
        Some(end) => format!(
            "{start_text} to {}",
            end.format("%A, %B %-d, %Y at %H:%M UTC")
        ),
        None => start_text,
    }
}

impl EventEmail {
    fn host<'a>(&'a self, config: &'a EmailConfig) -> &'a str {
        self.host_name
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(&config.brand_name)
    }
}

impl EmailTemplate for EventEmail {
    fn name(&self) -> &'static str {
        TEMPLATE
    }

    fn validate(&self) -> EmailResult<()> {
        require(TEMPLATE, "event id", &self.event_id)?;
        require(TEMPLATE, "event name", &self.event_name)?;
        if let Some(end) = self.end_time
            && end < self.start_time
        {
            return Err(EmailError::invalid_payload(
                TEMPLATE,
                "event cannot end before it starts",
            ));
        }
        if self.kind == EventKind::Ticket {
            require(
                TEMPLATE,
                "ticket name",
                self.ticket_name.as_deref().unwrap_or_default(),
            )?;
        }
        Ok(())
    }

    fn subject(&self, config: &EmailConfig) -> String {
        let event = &self.event_name;
        match self.kind {
            EventKind::Registration => format!("You're registered for {event}"),
            EventKind::Ticket => format!("Your ticket for {event}"),
            EventKind::Reminder => format!(
                "Reminder: {event} starts {}",
                self.start_time.format("%B %-d at %H:%M UTC")
            ),
            EventKind::Invitation => format!("{} invited you to {event}", self.host(config)),
        }
    }

    fn body(&self, config: &EmailConfig) -> EmailBody {
        let event = &self.event_name;
        let greeting = match self.recipient_name.as_deref() {
            Some(name) if !name.trim().is_empty() => format!("Hi {name},"),
            _ => "Hi,".to_string(),
        };
        let event_page = config.page(&format!("event/{}", self.event_id));

        let (intro, action, link) = match self.kind {
            EventKind::Registration => (
                format!("Your registration for {event} is confirmed. We will send your ticket closer to the date."),
                "View event",
                event_page,
            ),
            EventKind::Ticket => (
                format!("Here is your ticket for {event}. Show the code below at check-in."),
                "View ticket",
                format!("{event_page}/ticket"),
            ),
            EventKind::Reminder => (
                format!("{event} is coming up soon. We look forward to seeing you there."),
                "View event",
                event_page,
            ),
            EventKind::Invitation => (
                format!("{} has invited you to {event}.", self.host(config)),
                "Accept invitation",
                format!("{event_page}/invitation"),
            ),
        };

        let mut body = EmailBody::new(intro.clone())
            .heading(self.subject(config))
            .paragraph(greeting)
            .paragraph(intro)
            .details(vec![
                ("Event", event.clone()),
                ("When", when(self.start_time, self.end_time)),
                ("Where", self.location.clone().unwrap_or_default()),
                ("Ticket", self.ticket_name.clone().unwrap_or_default()),
            ]);
        if self.kind == EventKind::Ticket
            && let Some(qr) = &self.qr_code_url
        {
            body = body.image(qr.as_str(), "Check-in code");
        }
        body.button(action, link)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::render;

    fn registration() -> EventEmail {
        EventEmail {
            kind: EventKind::Registration,
            recipient_name: Some("carol".into()),
            event_id: "devcon-25".into(),
            event_name: "Builders Night".into(),
            host_name: None,
            location: Some("Bucharest".into()),
            start_time: Utc.with_ymd_and_hms(2025, 11, 20, 18, 0, 0).unwrap(),
            end_time: Some(Utc.with_ymd_and_hms(2025, 11, 20, 22, 30, 0).unwrap()),
            ticket_name: None,
            qr_code_url: None,
        }
    }

    #[test]
    fn registration_email() {
        let rendered = render(&registration(), &EmailConfig::default()).unwrap();
        assert_eq!(rendered.subject, "You're registered for Builders Night");
        assert!(rendered.html.contains("You&#39;re registered for Builders Night"));
        assert!(
            rendered
                .text
                .contains("When: Thursday, November 20, 2025 at 18:00 UTC to 22:30 UTC")
        );
        assert!(rendered.text.contains("Where: Bucharest"));
        assert!(!rendered.text.contains("Ticket:"));
        assert!(rendered.text.contains("View event: https://xoxno.com/event/devcon-25"));
    }

    #[test]
    fn ticket_requires_a_name_and_shows_qr() {
        let missing = EventEmail {
            kind: EventKind::Ticket,
            ..registration()
        };
        assert!(render(&missing, &EmailConfig::default()).is_err());

        let ticket = EventEmail {
            kind: EventKind::Ticket,
            ticket_name: Some("VIP".into()),
            qr_code_url: Some(Url::parse("https://media.xoxno.com/qr/1.png").unwrap()),
            ..registration()
        };
        let rendered = render(&ticket, &EmailConfig::default()).unwrap();
        assert_eq!(rendered.subject, "Your ticket for Builders Night");
        assert!(rendered.html.contains("https://media.xoxno.com/qr/1.png"));
        assert!(rendered.text.contains("Ticket: VIP"));
        assert!(rendered.text.contains("/event/devcon-25/ticket"));
    }

    #[test]
    fn reminder_and_invitation_subjects() {
        let reminder = EventEmail {
            kind: EventKind::Reminder,
            end_time: None,
            ..registration()
        };
        assert_eq!(
            render(&reminder, &EmailConfig::default()).unwrap().subject,
            "Reminder: Builders Night starts November 20 at 18:00 UTC"
        );

        let invitation = EventEmail {
            kind: EventKind::Invitation,
            host_name: Some("Dave".into()),
            ..registration()
        };
        let rendered = render(&invitation, &EmailConfig::default()).unwrap();
        assert_eq!(rendered.subject, "Dave invited you to Builders Night");
        assert!(rendered.text.contains("Accept invitation: "));

        let anonymous = EventEmail {
            host_name: None,
            ..invitation
        };
        assert_eq!(
            render(&anonymous, &EmailConfig::default()).unwrap().subject,
            "XOXNO invited you to Builders Night"
        );
    }

    #[test]
    fn end_before_start_is_rejected() {
        let email = EventEmail {
            end_time: Some(Utc.with_ymd_and_hms(2025, 11, 19, 0, 0, 0).unwrap()),
            ..registration()
        };
        let error = render(&email, &EmailConfig::default()).unwrap_err();
        assert!(error.to_string().contains("end before it starts"));
    }
}
