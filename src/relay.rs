//! `POST /api/send-email`: sends a confirmation to the visitor and an alert to
//! the site owner through the SendGrid v3 mail API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::inquiry::Inquiry;

pub const SEND_EMAIL_PATH: &str = "/api/send-email";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub api_base: String,
    pub api_key: String,
    pub sender: String,
    pub owner: String,
    pub brand: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.sendgrid.com".to_string(),
            api_key: String::new(),
            sender: "no-reply@devmaster.dev".to_string(),
            owner: "contact@devmaster.dev".to_string(),
            brand: "DevMaster".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Mail API request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Mail API refused message to {to}: {status}")]
    Delivery { to: String, status: StatusCode },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct MailSend<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

impl<'a> From<&'a Email> for MailSend<'a> {
    fn from(email: &'a Email) -> Self {
        MailSend {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from: Address { email: &email.from },
            subject: &email.subject,
            content: [Content {
                kind: "text/html",
                value: &email.html,
            }],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SendGridMailer {
    client: Client,
    api_base: String,
    api_key: String,
}

impl SendGridMailer {
    pub fn new(client: Client, api_base: &str, api_key: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn send(&self, email: &Email) -> Result<(), RelayError> {
        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&MailSend::from(email))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!(to = %email.to, "mail accepted");
            Ok(())
        } else {
            Err(RelayError::Delivery {
                to: email.to.clone(),
                status,
            })
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `<li>` rows for every filled-in field. Optional fields are skipped when empty.
fn detail_list(inquiry: &Inquiry) -> String {
    let budget = inquiry.budget.map(|b| b.to_string()).unwrap_or_default();
    let timeline = inquiry.timeline.map(|t| t.to_string()).unwrap_or_default();
    let services = inquiry.services_joined();
    let rows = [
        ("Name", inquiry.name.as_str(), true),
        ("Email", inquiry.email.as_str(), true),
        ("Company", inquiry.company.as_str(), false),
        ("Phone", inquiry.phone.as_str(), false),
        ("Services", services.as_str(), true),
        ("Budget", budget.as_str(), false),
        ("Timeline", timeline.as_str(), false),
        ("Subject", inquiry.subject.as_str(), true),
        ("Message", inquiry.message.as_str(), true),
    ];
    rows.iter()
        .filter(|(_, value, required)| *required || !value.trim().is_empty())
        .map(|(label, value, _)| {
            format!("<li><strong>{label}:</strong> {}</li>", escape_html(value))
        })
        .collect()
}

pub fn confirmation_email(inquiry: &Inquiry, settings: &MailSettings) -> Email {
    let brand = escape_html(&settings.brand);
    Email {
        to: inquiry.email.clone(),
        from: settings.sender.clone(),
        subject: "Thank You for Your Inquiry".to_string(),
        html: format!(
            "<h2>Hello {name},</h2>\
             <p>Thank you for reaching out to {brand}. We've received your project inquiry and will get back to you within 24 hours.</p>\
             <h3>Your Submission Details:</h3>\
             <ul>{details}</ul>\
             <p>Best regards,<br>{brand}</p>",
            name = escape_html(&inquiry.name),
            details = detail_list(inquiry),
        ),
    }
}

pub fn owner_email(inquiry: &Inquiry, settings: &MailSettings) -> Email {
    Email {
        to: settings.owner.clone(),
        from: settings.sender.clone(),
        subject: format!("New Project Inquiry: {}", inquiry.subject),
        html: format!(
            "<h2>New Project Inquiry</h2>\
             <p>You have received a new inquiry from {name}.</p>\
             <h3>Submission Details:</h3>\
             <ul>{details}</ul>",
            name = escape_html(&inquiry.name),
            details = detail_list(inquiry),
        ),
    }
}

#[derive(Debug, Clone)]
pub struct NotificationRelay {
    mailer: SendGridMailer,
    settings: MailSettings,
}

impl NotificationRelay {
    pub fn new(client: Client, settings: MailSettings) -> Self {
        let mailer = SendGridMailer::new(client, &settings.api_base, &settings.api_key);
        Self { mailer, settings }
    }

    /// Sends both messages concurrently. Either failing fails the whole call.
    pub async fn notify(&self, inquiry: &Inquiry) -> Result<(), RelayError> {
        let confirmation = confirmation_email(inquiry, &self.settings);
        let alert = owner_email(inquiry, &self.settings);
        tokio::try_join!(self.mailer.send(&confirmation), self.mailer.send(&alert))?;
        Ok(())
    }
}

pub async fn send_email(
    State(relay): State<NotificationRelay>,
    payload: Result<Json<Inquiry>, JsonRejection>,
) -> impl IntoResponse {
    let inquiry = match payload {
        Ok(Json(inquiry)) if inquiry.validate().is_ok() => inquiry,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing required fields" })),
            );
        }
    };

    match relay.notify(&inquiry).await {
        Ok(()) => {
            tracing::info!(subject = %inquiry.subject, "inquiry emails sent");
            (
                StatusCode::OK,
                Json(json!({ "message": "Emails sent successfully" })),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Error sending emails");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to send emails" })),
            )
        }
    }
}

pub fn routes<S>(relay: NotificationRelay) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(SEND_EMAIL_PATH, post(send_email))
        .with_state(relay)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use http::Request;
    use httpmock::prelude::*;
    use tower::ServiceExt;

    use super::*;
    use crate::inquiry::Budget;

    fn jane() -> Inquiry {
        let mut inquiry = Inquiry::seeded(Some("Other"));
        inquiry.name = "Jane".to_string();
        inquiry.email = "jane@x.com".to_string();
        inquiry.subject = "Hi".to_string();
        inquiry.message = "Test".to_string();
        inquiry
    }

    fn relay_for(server: &MockServer) -> NotificationRelay {
        NotificationRelay::new(
            Client::new(),
            MailSettings {
                api_base: server.base_url(),
                api_key: "sg-key".to_string(),
                ..MailSettings::default()
            },
        )
    }

    async fn post_json(relay: NotificationRelay, body: String) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(SEND_EMAIL_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = routes::<()>(relay).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_detail_list_skips_empty_optionals() {
        let mut inquiry = jane();
        let list = detail_list(&inquiry);
        assert!(list.contains("<li><strong>Services:</strong> Other</li>"));
        assert!(!list.contains("Company"));
        assert!(!list.contains("Budget"));

        inquiry.company = "Acme".to_string();
        inquiry.budget = Some(Budget::Over100k);
        let list = detail_list(&inquiry);
        assert!(list.contains("<li><strong>Company:</strong> Acme</li>"));
        assert!(list.contains("<li><strong>Budget:</strong> Over $100,000</li>"));
    }

    #[test]
    fn test_emails_escape_input() {
        let mut inquiry = jane();
        inquiry.name = "<script>alert(1)</script>".to_string();
        let settings = MailSettings::default();

        let confirmation = confirmation_email(&inquiry, &settings);
        assert_eq!(confirmation.to, "jane@x.com");
        assert_eq!(confirmation.subject, "Thank You for Your Inquiry");
        assert!(!confirmation.html.contains("<script>"));
        assert!(confirmation.html.contains("&lt;script&gt;"));

        let alert = owner_email(&inquiry, &settings);
        assert_eq!(alert.to, "contact@devmaster.dev");
        assert_eq!(alert.subject, "New Project Inquiry: Hi");
    }

    #[tokio::test]
    async fn test_notify_sends_both() {
        let server = MockServer::start_async().await;
        let to_visitor = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v3/mail/send")
                    .header("authorization", "Bearer sg-key")
                    .body_contains("jane@x.com")
                    .body_contains("Thank You for Your Inquiry");
                then.status(202);
            })
            .await;
        let to_owner = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v3/mail/send")
                    .body_contains("contact@devmaster.dev")
                    .body_contains("New Project Inquiry: Hi");
                then.status(202);
            })
            .await;

        relay_for(&server).notify(&jane()).await.unwrap();
        to_visitor.assert_hits_async(1).await;
        to_owner.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_notify_fails_if_either_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).body_contains("Thank You for Your Inquiry");
                then.status(202);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).body_contains("New Project Inquiry");
                then.status(401);
            })
            .await;

        let err = relay_for(&server).notify(&jane()).await.unwrap_err();
        let RelayError::Delivery { to, status } = err else {
            panic!("expected a delivery error, got {err:?}");
        };
        assert_eq!(to, "contact@devmaster.dev");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_endpoint_success() {
        let server = MockServer::start_async().await;
        let mail = server
            .mock_async(|when, then| {
                when.method(POST).path("/v3/mail/send");
                then.status(202);
            })
            .await;

        let body = serde_json::to_string(&jane()).unwrap();
        let (status, json) = post_json(relay_for(&server), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Emails sent successfully");
        mail.assert_hits_async(2).await;
    }

    #[tokio::test]
    async fn test_endpoint_missing_fields() {
        let server = MockServer::start_async().await;
        let mail = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(202);
            })
            .await;

        let mut inquiry = jane();
        inquiry.services.clear();
        let body = serde_json::to_string(&inquiry).unwrap();
        let (status, json) = post_json(relay_for(&server), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required fields");

        let (status, _) = post_json(relay_for(&server), "not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        mail.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_endpoint_delivery_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v3/mail/send");
                then.status(500);
            })
            .await;

        let body = serde_json::to_string(&jane()).unwrap();
        let (status, json) = post_json(relay_for(&server), body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to send emails");
    }
}
