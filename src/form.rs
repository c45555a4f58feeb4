//! State controller for the contact form.
//!
//! A [`ContactForm`] owns one [`Inquiry`] and walks it through
//! `Editing -> Submitting -> Submitted`, falling back to `Editing` with an
//! error message when validation or delivery fails.

use std::time::Duration;

use crate::error::SubmitError;
use crate::gateway::SubmissionGateway;
use crate::inquiry::{Budget, Field, Inquiry, Timeline};

/// How long the confirmation stays up before the form resets and closes.
pub const RESET_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing { error: Option<String> },
    Submitting,
    Submitted,
}

impl Default for FormState {
    fn default() -> Self {
        FormState::Editing { error: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    inquiry: Inquiry,
    state: FormState,
}

impl ContactForm {
    pub fn new(seed_service: Option<&str>) -> Self {
        Self {
            inquiry: Inquiry::seeded(seed_service),
            state: FormState::default(),
        }
    }

    pub fn inquiry(&self) -> &Inquiry {
        &self.inquiry
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FormState::Editing { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.state == FormState::Submitted
    }

    fn is_editable(&self) -> bool {
        matches!(self.state, FormState::Editing { .. })
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        if self.is_editable() {
            self.inquiry.set_field(field, value);
        }
    }

    pub fn set_budget(&mut self, budget: Option<Budget>) {
        if self.is_editable() {
            self.inquiry.budget = budget;
        }
    }

    pub fn set_timeline(&mut self, timeline: Option<Timeline>) {
        if self.is_editable() {
            self.inquiry.timeline = timeline;
        }
    }

    pub fn toggle_service(&mut self, service: &str) {
        if self.is_editable() {
            self.inquiry.toggle_service(service);
        }
    }

    /// Validates and moves to `Submitting`, handing back the snapshot to send.
    ///
    /// Nothing should be sent when this returns an error.
    pub fn begin_submit(&mut self) -> Result<Inquiry, SubmitError> {
        match self.state {
            FormState::Submitting => return Err(SubmitError::InFlight),
            FormState::Submitted => return Err(SubmitError::AlreadySent),
            FormState::Editing { .. } => {}
        }
        if let Err(e) = self.inquiry.validate() {
            let err = SubmitError::from(e);
            self.state = FormState::Editing {
                error: Some(err.user_message()),
            };
            return Err(err);
        }
        self.state = FormState::Submitting;
        Ok(self.inquiry.clone())
    }

    /// Applies the gateway's answer. Fields are kept on failure so the visitor can retry.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) {
        if !self.is_submitting() {
            log::warn!("ignoring submission result outside of an active submission");
            return;
        }
        self.state = match result {
            Ok(()) => FormState::Submitted,
            Err(e) => {
                log::error!("Form submission error: {e}");
                FormState::Editing {
                    error: Some(e.user_message()),
                }
            }
        };
    }

    /// Runs one full attempt against `gateway`.
    pub async fn submit<G: SubmissionGateway>(&mut self, gateway: &G) -> Result<(), SubmitError> {
        let inquiry = self.begin_submit()?;
        let result = gateway.send(&inquiry).await;
        self.finish_submit(result.clone());
        result
    }

    /// Called once [`RESET_DELAY`] has passed after a successful submission.
    pub fn acknowledge(&mut self) {
        if self.is_submitted() {
            *self = Self::default();
        }
    }

    /// The host hid the form; whatever was typed is dropped.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}
