use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::SubmitError;
use crate::inquiry::Inquiry;

const NOT_SPECIFIED: &str = "Not specified";
const NOT_PROVIDED: &str = "Not provided";

/// Sends a validated [`Inquiry`] somewhere that will turn it into an email.
///
/// One call is one attempt. Implementations never retry.
#[allow(async_fn_in_trait)]
pub trait SubmissionGateway {
    async fn send(&self, inquiry: &Inquiry) -> Result<(), SubmitError>;
}

/// Settings for the hosted form relay (Web3Forms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    pub endpoint: String,
    pub access_key: String,
    pub from_name: String,
    pub site_origin: String,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.web3forms.com/submit".to_string(),
            access_key: String::new(),
            from_name: "DevMaster Portfolio".to_string(),
            site_origin: "http://localhost:3000".to_string(),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Maps an inquiry onto the form fields the relay expects.
pub fn relay_fields(inquiry: &Inquiry, settings: &RelaySettings) -> Vec<(&'static str, String)> {
    let origin = settings.site_origin.trim_end_matches('/');
    vec![
        ("access_key", settings.access_key.clone()),
        ("name", inquiry.name.clone()),
        ("email", inquiry.email.clone()),
        ("subject", format!("New Project Inquiry: {}", inquiry.subject)),
        ("company", or_placeholder(&inquiry.company, NOT_SPECIFIED)),
        ("phone", or_placeholder(&inquiry.phone, NOT_PROVIDED)),
        ("services", inquiry.services_joined()),
        (
            "budget",
            inquiry
                .budget
                .map(|b| b.to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
        (
            "timeline",
            inquiry
                .timeline
                .map(|t| t.to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        ),
        ("project_details", inquiry.message.clone()),
        ("redirect", format!("{origin}/thank-you")),
        ("from_name", settings.from_name.clone()),
        ("autoresponse", "true".to_string()),
    ]
}

/// JSON body returned by the relay. Both fields may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
}

/// A submission went through if the status is 2xx/3xx or the body says so.
pub fn is_accepted(status: StatusCode, body: Option<&RelayResponse>) -> bool {
    status.is_success()
        || status.is_redirection()
        || body.and_then(|b| b.success).unwrap_or(false)
}

#[cfg(feature = "ssr")]
pub use relay_client::FormRelayGateway;

#[cfg(feature = "ssr")]
mod relay_client {
    use reqwest::{multipart::Form, redirect::Policy, Client};

    use super::*;

    #[derive(Debug, Clone)]
    pub struct FormRelayGateway {
        client: Client,
        settings: RelaySettings,
    }

    impl FormRelayGateway {
        pub fn new(settings: RelaySettings) -> Result<Self, reqwest::Error> {
            // a 303 to the thank-you page is a success, so don't chase it
            let client = Client::builder().redirect(Policy::none()).build()?;
            Ok(Self { client, settings })
        }

        pub async fn post(&self, inquiry: &Inquiry) -> Result<(), SubmitError> {
            let form = relay_fields(inquiry, &self.settings)
                .into_iter()
                .fold(Form::new(), |form, (name, value)| form.text(name, value));

            let response = self
                .client
                .post(&self.settings.endpoint)
                .multipart(form)
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "form relay unreachable");
                    SubmitError::Network(e.to_string())
                })?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| SubmitError::Network(e.to_string()))?;
            let body = serde_json::from_str::<RelayResponse>(&text).ok();

            if is_accepted(status, body.as_ref()) {
                tracing::info!(%status, "inquiry accepted by form relay");
                Ok(())
            } else {
                let message = body
                    .and_then(|b| b.message)
                    .unwrap_or_else(|| format!("relay responded with {status}"));
                tracing::warn!(%status, %message, "form relay rejected inquiry");
                Err(SubmitError::Delivery(message))
            }
        }
    }

    impl SubmissionGateway for FormRelayGateway {
        async fn send(&self, inquiry: &Inquiry) -> Result<(), SubmitError> {
            self.post(inquiry).await
        }
    }
}
