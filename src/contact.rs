//! Contact form state.
//!
//! The form is a small request/response state machine, independent of the
//! grid and carousel:
//!
//! ```text
//! Idle ──begin_submit──▶ InFlight ──finish(Ok)──▶ Idle + success, fields cleared
//!                           │
//!                           └──finish(Err)─▶ Idle + failure, fields kept
//! ```
//!
//! While a request is in flight, a second [`begin_submit`](ContactForm::begin_submit)
//! is rejected and field edits are ignored (the controls render disabled).
//! The I/O itself happens outside: the caller takes the
//! [`ContactSubmission`] returned by `begin_submit`, sends it with
//! [`ApiClient::submit_contact`](crate::client::ApiClient::submit_contact), and
//! reports the outcome with [`finish`](ContactForm::finish).

use crate::client::ServiceError;
use crate::types::ContactSubmission;
use maud::{Markup, html};
use thiserror::Error;
use tracing::{info, warn};

pub const SUCCESS_MESSAGE: &str = "Thank you for your inquiry! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

impl ContactField {
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Phone => "Phone",
            ContactField::Message => "Message",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, ContactField::Phone)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("{} is required", .0.label())]
    MissingField(ContactField),
}

/// Outcome shown under the form after a submission resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Success,
    Failure,
}

impl FormStatus {
    pub fn message(self) -> &'static str {
        match self {
            FormStatus::Success => SUCCESS_MESSAGE,
            FormStatus::Failure => FAILURE_MESSAGE,
        }
    }

    fn class(self) -> &'static str {
        match self {
            FormStatus::Success => "success",
            FormStatus::Failure => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    message: String,
    status: Option<FormStatus>,
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Message => &self.message,
        }
    }

    /// Update a field. Ignored (returns `false`) while submitting.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) -> bool {
        if self.submitting {
            return false;
        }
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
        true
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn status(&self) -> Option<FormStatus> {
        self.status
    }

    /// Start a submission.
    ///
    /// Fails with [`ContactError::InFlight`] while a previous request is
    /// unresolved, or [`ContactError::MissingField`] when a required field is
    /// blank. On success the form is marked in flight and any previous status
    /// message is cleared.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, ContactError> {
        if self.submitting {
            return Err(ContactError::InFlight);
        }
        for field in [ContactField::Name, ContactField::Email, ContactField::Message] {
            if self.field(field).trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }
        self.submitting = true;
        self.status = None;
        let phone = self.phone.trim();
        Ok(ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            message: self.message.clone(),
        })
    }

    /// Resolve the in-flight submission. Ignored when nothing is in flight.
    pub fn finish(&mut self, outcome: Result<(), ServiceError>) {
        if !self.submitting {
            return;
        }
        self.submitting = false;
        match outcome {
            Ok(()) => {
                info!("contact inquiry submitted");
                self.name.clear();
                self.email.clear();
                self.phone.clear();
                self.message.clear();
                self.status = Some(FormStatus::Success);
            }
            Err(e) => {
                warn!(error = %e, "contact inquiry failed");
                self.status = Some(FormStatus::Failure);
            }
        }
    }

    pub fn render(&self, revealed: bool) -> Markup {
        let disabled = self.submitting;
        html! {
            section.contact-section id="contact" {
                div.contact-container.visible[revealed] {
                    h2.contact-title { "Get In Touch" }
                    p.contact-subtitle { "Let's create something beautiful together" }
                    form.contact-form {
                        (self.render_input(ContactField::Name, "text", disabled))
                        (self.render_input(ContactField::Email, "email", disabled))
                        (self.render_input(ContactField::Phone, "tel", disabled))
                        div.form-group {
                            label for="message" { "Message *" }
                            textarea id="message" name="message" rows="6" required disabled[disabled] {
                                (self.message)
                            }
                        }
                        @if let Some(status) = self.status {
                            div class={ "form-message " (status.class()) } { (status.message()) }
                        }
                        button.submit-button type="submit" disabled[disabled] {
                            @if disabled { "Sending..." } @else { "Send Message" }
                        }
                    }
                }
            }
        }
    }

    fn render_input(&self, field: ContactField, kind: &str, disabled: bool) -> Markup {
        let id = field.label().to_ascii_lowercase();
        html! {
            div.form-group {
                label for=(id) {
                    (field.label())
                    @if field.is_required() { " *" }
                }
                input type=(kind) id=(id) name=(id) value=(self.field(field))
                    required[field.is_required()] disabled[disabled];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_field(ContactField::Name, "Ada Lovelace");
        form.set_field(ContactField::Email, "ada@example.com");
        form.set_field(ContactField::Message, "Engagement shoot in May?");
        form
    }

    fn failure() -> ServiceError {
        ServiceError::Status {
            endpoint: "contact".into(),
            status: 500,
        }
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut form = filled();
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.phone, None);
        assert_eq!(form.begin_submit(), Err(ContactError::InFlight));

        form.finish(Ok(()));
        assert!(!form.is_submitting());
    }

    #[test]
    fn resubmit_allowed_after_failure() {
        let mut form = filled();
        form.begin_submit().unwrap();
        form.finish(Err(failure()));
        assert_eq!(form.status(), Some(FormStatus::Failure));
        // Entered values are kept so the user can retry
        assert_eq!(form.field(ContactField::Name), "Ada Lovelace");
        assert!(form.begin_submit().is_ok());
        assert_eq!(form.status(), None);
    }

    #[test]
    fn success_clears_fields() {
        let mut form = filled();
        form.set_field(ContactField::Phone, "555-0100");
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.phone.as_deref(), Some("555-0100"));
        form.finish(Ok(()));
        assert_eq!(form.status().unwrap().message(), SUCCESS_MESSAGE);
        assert_eq!(form.field(ContactField::Email), "");
    }

    #[test]
    fn missing_required_field_blocks_submit() {
        let mut form = filled();
        form.set_field(ContactField::Email, "   ");
        assert_eq!(
            form.begin_submit(),
            Err(ContactError::MissingField(ContactField::Email))
        );
        assert!(!form.is_submitting());
    }

    #[test]
    fn edits_ignored_while_in_flight() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert!(!form.set_field(ContactField::Name, "Someone Else"));
        assert_eq!(form.field(ContactField::Name), "Ada Lovelace");
    }

    #[test]
    fn finish_without_submit_is_ignored() {
        let mut form = filled();
        form.finish(Ok(()));
        assert_eq!(form.status(), None);
        assert_eq!(form.field(ContactField::Name), "Ada Lovelace");
    }

    #[test]
    fn render_disables_controls_in_flight() {
        let mut form = filled();
        form.begin_submit().unwrap();
        let html = form.render(true).into_string();
        assert!(html.contains("Sending..."));
        assert!(html.contains("disabled"));

        form.finish(Err(failure()));
        let html = form.render(true).into_string();
        assert!(html.contains("Send Message"));
        assert!(!html.contains("disabled"));
        assert!(html.contains(FAILURE_MESSAGE));
    }

    #[test]
    fn error_message_names_field() {
        assert_eq!(
            ContactError::MissingField(ContactField::Message).to_string(),
            "Message is required"
        );
    }
}
