use thiserror::Error;

use crate::inquiry::ValidationError;

pub const RETRY_MESSAGE: &str = "An error occurred while sending the message. Please try again or Try Contacting on Social Media Channel.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("A submission is already in progress")]
    InFlight,
    #[error("This inquiry has already been sent")]
    AlreadySent,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl SubmitError {
    /// Text shown next to the form. Network and delivery failures look the same to the visitor.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(e) => e.to_string(),
            SubmitError::InFlight | SubmitError::AlreadySent => self.to_string(),
            SubmitError::Network(_) | SubmitError::Delivery(_) => RETRY_MESSAGE.to_string(),
        }
    }
}
