//! Contact form state and the relay it submits to.

use folio_protocol::Locale;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::i18n::{self, TextKey};

/// Body posted to the form relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self, locale: Locale) -> &'static str {
        let key = match self {
            Field::Name => TextKey::ContactName,
            Field::Email => TextKey::ContactEmail,
            Field::Subject => TextKey::ContactSubject,
            Field::Message => TextKey::ContactMessage,
        };
        i18n::text(locale, key)
    }

    pub fn placeholder(self, locale: Locale) -> &'static str {
        let key = match self {
            Field::Name => TextKey::ContactNamePlaceholder,
            Field::Email => TextKey::ContactEmailPlaceholder,
            Field::Subject => TextKey::ContactSubjectPlaceholder,
            Field::Message => TextKey::ContactMessagePlaceholder,
        };
        i18n::text(locale, key)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0:?} is required")]
    Missing(Field),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("a submission is already in flight")]
    Busy,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("relay rejected the submission with status {0}")]
    Rejected(u16),
    #[error("relay unreachable: {0}")]
    Transport(String),
}

/// Delivers a submission to the third-party form relay.
pub trait ContactRelay {
    fn submit(&mut self, payload: &ContactPayload) -> Result<(), RelayError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Form fields plus a transient submission status.
///
/// `Idle → Submitting → Success | Error → Idle`. The result stays visible
/// for the configured dismiss delay, measured from when it arrived; a
/// success also clears the fields. None of this touches navigation state.
#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: ContactPayload,
    status: SubmitStatus,
    dismiss_at_ms: Option<f64>,
    dismiss_after_ms: f64,
}

impl ContactForm {
    pub fn new(dismiss_after_ms: f64) -> Self {
        Self {
            fields: ContactPayload::default(),
            status: SubmitStatus::Idle,
            dismiss_at_ms: None,
            dismiss_after_ms,
        }
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn fields(&self) -> &ContactPayload {
        &self.fields
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.fields.name,
            Field::Email => &self.fields.email,
            Field::Subject => &self.fields.subject,
            Field::Message => &self.fields.message,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.fields.name,
            Field::Email => &mut self.fields.email,
            Field::Subject => &mut self.fields.subject,
            Field::Message => &mut self.fields.message,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        for field in Field::ALL {
            if self.field(field).trim().is_empty() {
                return Err(ContactError::Missing(field));
            }
        }
        if !is_plausible_email(self.fields.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }

    /// Validate and enter `Submitting`, handing out the payload to send.
    pub fn begin_submit(&mut self) -> Result<ContactPayload, ContactError> {
        if self.status == SubmitStatus::Submitting {
            return Err(ContactError::Busy);
        }
        self.validate()?;
        self.status = SubmitStatus::Submitting;
        self.dismiss_at_ms = None;
        Ok(self.fields.clone())
    }

    /// Record the relay's answer for the submission in flight.
    pub fn finish_submit(&mut self, result: Result<(), RelayError>, now_ms: f64) {
        if self.status != SubmitStatus::Submitting {
            return;
        }
        self.status = match result {
            Ok(()) => {
                info!("contact message delivered");
                self.fields = ContactPayload::default();
                SubmitStatus::Success
            }
            Err(e) => {
                warn!(error = %e, "contact message failed");
                SubmitStatus::Error
            }
        };
        self.dismiss_at_ms = Some(now_ms + self.dismiss_after_ms);
    }

    /// Run a whole submission through `relay`.
    pub fn submit_with(
        &mut self,
        relay: &mut dyn ContactRelay,
        now_ms: f64,
    ) -> Result<SubmitStatus, ContactError> {
        let payload = self.begin_submit()?;
        let result = relay.submit(&payload);
        self.finish_submit(result, now_ms);
        Ok(self.status)
    }

    /// Clear an expired result. Returns whether the status changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.dismiss_at_ms {
            Some(at) if now_ms >= at => {
                self.status = SubmitStatus::Idle;
                self.dismiss_at_ms = None;
                true
            }
            _ => false,
        }
    }

    /// When the current result will be cleared.
    pub fn dismiss_at(&self) -> Option<f64> {
        self.dismiss_at_ms
    }

    /// Status line to show under the form, if any.
    pub fn status_text(&self, locale: Locale) -> Option<&'static str> {
        match self.status {
            SubmitStatus::Idle => None,
            SubmitStatus::Submitting => Some(i18n::text(locale, TextKey::ContactSending)),
            SubmitStatus::Success => Some(i18n::text(locale, TextKey::ContactSuccess)),
            SubmitStatus::Error => Some(i18n::text(locale, TextKey::ContactError)),
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !email.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubRelay {
        result: Result<(), RelayError>,
        sent: Vec<ContactPayload>,
    }

    impl ContactRelay for StubRelay {
        fn submit(&mut self, payload: &ContactPayload) -> Result<(), RelayError> {
            self.sent.push(payload.clone());
            self.result.clone()
        }
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::new(3000.0);
        form.set_field(Field::Name, "Ada");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Subject, "Hello");
        form.set_field(Field::Message, "Let's build something.");
        form
    }

    #[test]
    fn requires_every_field() {
        let mut form = filled();
        form.set_field(Field::Subject, "   ");
        assert_eq!(form.begin_submit(), Err(ContactError::Missing(Field::Subject)));
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn rejects_implausible_email() {
        for bad in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com", "a@b@c.d"] {
            let mut form = filled();
            form.set_field(Field::Email, bad);
            assert_eq!(form.validate(), Err(ContactError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn success_clears_fields_then_dismisses() {
        let mut form = filled();
        let mut relay = StubRelay {
            result: Ok(()),
            sent: Vec::new(),
        };
        assert_eq!(form.submit_with(&mut relay, 1000.0), Ok(SubmitStatus::Success));
        assert_eq!(relay.sent.len(), 1);
        assert_eq!(relay.sent[0].email, "ada@example.com");
        assert_eq!(form.fields(), &ContactPayload::default());
        assert_eq!(
            form.status_text(Locale::Secondary),
            Some("Message sent successfully! I'll get back to you soon.")
        );

        assert!(!form.tick(3999.0));
        assert!(form.tick(4000.0));
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(form.status_text(Locale::Secondary), None);
    }

    #[test]
    fn failure_keeps_fields() {
        let mut form = filled();
        let mut relay = StubRelay {
            result: Err(RelayError::Rejected(422)),
            sent: Vec::new(),
        };
        assert_eq!(form.submit_with(&mut relay, 0.0), Ok(SubmitStatus::Error));
        assert_eq!(form.field(Field::Name), "Ada");
        assert_eq!(form.dismiss_at(), Some(3000.0));
    }

    #[test]
    fn second_submit_while_in_flight_is_busy() {
        let mut form = filled();
        assert!(form.begin_submit().is_ok());
        assert_eq!(form.status(), SubmitStatus::Submitting);
        assert_eq!(form.begin_submit(), Err(ContactError::Busy));
        assert_eq!(form.status_text(Locale::Primary), Some("Enviando..."));
    }

    #[test]
    fn stray_result_is_ignored() {
        let mut form = filled();
        form.finish_submit(Ok(()), 0.0);
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(form.field(Field::Name), "Ada");
    }
}
