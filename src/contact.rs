//! Booking inquiries from the contact form.
//!
//! The contact form posts JSON with camelCase keys. This module validates the
//! payload and renders the notification message (subject, plain text body,
//! HTML body). Delivering the message is left to the mail transport.
//!
//! Only `name`, `email` and `message` are required. Optional fields that are
//! blank are left out of both bodies rather than printed as empty lines.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InquiryError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

#[derive(Error, Debug)]
pub enum InquiryLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] InquiryError),
}

/// A booking inquiry as submitted by the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Hyphenated event type, e.g. `wedding-reception`.
    pub event_type: String,
    pub event_date: String,
    pub event_location: String,
    pub guest_count: String,
    /// Budget bucket key, e.g. `2500-5000`.
    pub budget_range: String,
    pub message: String,
}

impl Inquiry {
    /// Check required fields and the email shape.
    pub fn validate(&self) -> Result<(), InquiryError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(InquiryError::MissingField(field));
            }
        }
        if !looks_like_email(self.email.trim()) {
            return Err(InquiryError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Parse and validate a saved inquiry.
    pub fn load(path: &Path) -> Result<Self, InquiryLoadError> {
        let content = fs::read_to_string(path)?;
        let inquiry: Inquiry = serde_json::from_str(&content)?;
        inquiry.validate()?;
        Ok(inquiry)
    }

    pub fn subject(&self) -> String {
        format!("New Booking Inquiry from {}", self.name.trim())
    }

    pub fn event_type_label(&self) -> String {
        event_type_label(&self.event_type)
    }

    pub fn budget_label(&self) -> String {
        budget_label(&self.budget_range)
    }

    /// Event detail lines that were filled in, as `(label, value)`.
    fn event_details(&self) -> Vec<(&'static str, String)> {
        let mut details = Vec::new();
        if !self.event_type.trim().is_empty() {
            details.push(("Event Type", self.event_type_label()));
        }
        if !self.event_date.trim().is_empty() {
            details.push(("Event Date", self.event_date.trim().to_string()));
        }
        if !self.event_location.trim().is_empty() {
            details.push(("Event Location", self.event_location.trim().to_string()));
        }
        if !self.guest_count.trim().is_empty() {
            details.push(("Estimated Guest Count", self.guest_count.trim().to_string()));
        }
        if !self.budget_range.trim().is_empty() {
            details.push(("Budget Range", self.budget_label()));
        }
        details
    }

    /// Plain text notification body.
    pub fn text_body(&self) -> String {
        let mut lines = vec![
            self.subject(),
            String::new(),
            "Contact Information:".to_string(),
            format!("- Name: {}", self.name.trim()),
            format!("- Email: {}", self.email.trim()),
        ];
        if !self.phone.trim().is_empty() {
            lines.push(format!("- Phone: {}", self.phone.trim()));
        }

        let details = self.event_details();
        if !details.is_empty() {
            lines.push(String::new());
            lines.push("Event Details:".to_string());
            for (label, value) in details {
                lines.push(format!("- {label}: {value}"));
            }
        }

        lines.push(String::new());
        lines.push("Message:".to_string());
        lines.push(self.message.trim().to_string());
        lines.join("\n")
    }

    /// HTML notification body. All submitted text is escaped.
    pub fn html_body(&self) -> String {
        self.render_html().into_string()
    }

    fn render_html(&self) -> Markup {
        let email = self.email.trim();
        let phone = self.phone.trim();
        let details = self.event_details();
        html! {
            div.inquiry {
                h2 { (self.subject()) }
                h3 { "Contact Information" }
                ul {
                    li { strong { "Name:" } " " (self.name.trim()) }
                    li { strong { "Email:" } " " a href={ "mailto:" (email) } { (email) } }
                    @if !phone.is_empty() {
                        li { strong { "Phone:" } " " a href={ "tel:" (phone) } { (phone) } }
                    }
                }
                @if !details.is_empty() {
                    h3 { "Event Details" }
                    ul {
                        @for (label, value) in &details {
                            li { strong { (label) ":" } " " (value) }
                        }
                    }
                }
                h3 { "Message" }
                p.message { (self.message.trim()) }
            }
        }
    }
}

/// Minimal shape check: `local@domain.tld`, no whitespace.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// `wedding-reception` → `Wedding Reception`.
pub fn event_type_label(event_type: &str) -> String {
    let event_type = event_type.trim();
    if event_type.is_empty() {
        return NOT_SPECIFIED.to_string();
    }
    event_type
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Budget bucket key to its display range. Unknown keys pass through.
pub fn budget_label(range: &str) -> String {
    let range = range.trim();
    let label = match range {
        "" => NOT_SPECIFIED,
        "under-1000" => "Under $1,000",
        "1000-2500" => "$1,000 - $2,500",
        "2500-5000" => "$2,500 - $5,000",
        "5000-10000" => "$5,000 - $10,000",
        "10000-plus" => "$10,000+",
        other => other,
    };
    label.to_string()
}
