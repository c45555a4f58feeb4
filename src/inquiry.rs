use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Services offered on the portfolio page, in display order.
pub const SERVICES: [&str; 8] = [
    "Full-Stack Web Development",
    "Blockchain Development",
    "Cybersecurity Consulting",
    "Technical Consulting",
    "Code Review & Auditing",
    "Performance Optimization",
    "Team Training",
    "Other",
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Budget {
    #[serde(rename = "Under $5,000")]
    #[strum(serialize = "Under $5,000")]
    Under5k,
    #[serde(rename = "$5,000 - $15,000")]
    #[strum(serialize = "$5,000 - $15,000")]
    From5kTo15k,
    #[serde(rename = "$15,000 - $50,000")]
    #[strum(serialize = "$15,000 - $50,000")]
    From15kTo50k,
    #[serde(rename = "$50,000 - $100,000")]
    #[strum(serialize = "$50,000 - $100,000")]
    From50kTo100k,
    #[serde(rename = "Over $100,000")]
    #[strum(serialize = "Over $100,000")]
    Over100k,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum Timeline {
    #[serde(rename = "ASAP")]
    #[strum(serialize = "ASAP")]
    Asap,
    #[serde(rename = "Within 1 month")]
    #[strum(serialize = "Within 1 month")]
    WithinMonth,
    #[serde(rename = "1-3 months")]
    #[strum(serialize = "1-3 months")]
    OneToThreeMonths,
    #[serde(rename = "3-6 months")]
    #[strum(serialize = "3-6 months")]
    ThreeToSixMonths,
    #[serde(rename = "6+ months")]
    #[strum(serialize = "6+ months")]
    SixPlusMonths,
}

/// A contact-form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inquiry {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub services: BTreeSet<String>,
    pub budget: Option<Budget>,
    pub timeline: Option<Timeline>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Company,
    Phone,
    Subject,
    Message,
}

/// Required parts of an [`Inquiry`], used to report what is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Required {
    Name,
    Email,
    Services,
    Subject,
    Message,
}

impl fmt::Display for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Required::Name => "Name",
            Required::Email => "Email",
            Required::Services => "Services",
            Required::Subject => "Subject",
            Required::Message => "Message",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please fill in all required fields: Name, Email, Services, Subject, and Message.")]
pub struct ValidationError {
    pub missing: Vec<Required>,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl Inquiry {
    /// Empty inquiry, optionally seeded with the service the visitor asked about.
    pub fn seeded(service: Option<&str>) -> Self {
        let mut inquiry = Self::default();
        if let Some(service) = service.filter(|s| !is_blank(s)) {
            inquiry.services.insert(service.to_string());
        }
        inquiry
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::Phone => &self.phone,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Company => &mut self.company,
            Field::Phone => &mut self.phone,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value;
    }

    /// Adds the service if absent, removes it otherwise.
    pub fn toggle_service(&mut self, service: &str) {
        if !self.services.remove(service) {
            self.services.insert(service.to_string());
        }
    }

    pub fn services_joined(&self) -> String {
        self.services
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Checks the required fields. Whitespace-only values count as empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push(Required::Name);
        }
        if is_blank(&self.email) {
            missing.push(Required::Email);
        }
        if self.services.is_empty() {
            missing.push(Required::Services);
        }
        if is_blank(&self.subject) {
            missing.push(Required::Subject);
        }
        if is_blank(&self.message) {
            missing.push(Required::Message);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn jane() -> Inquiry {
        let mut inquiry = Inquiry::seeded(Some("Other"));
        inquiry.name = "Jane".to_string();
        inquiry.email = "jane@x.com".to_string();
        inquiry.subject = "Hi".to_string();
        inquiry.message = "Test".to_string();
        inquiry
    }

    #[test]
    fn test_valid_inquiry() {
        assert_eq!(jane().validate(), Ok(()));
    }

    #[test]
    fn test_each_required_field() {
        for field in [Field::Name, Field::Email, Field::Subject, Field::Message] {
            let mut inquiry = jane();
            inquiry.set_field(field, String::new());
            let err = inquiry.validate().expect_err("empty field should fail");
            assert_eq!(err.missing.len(), 1);
        }

        let mut inquiry = jane();
        inquiry.services.clear();
        let err = inquiry.validate().unwrap_err();
        assert_eq!(err.missing, vec![Required::Services]);
    }

    #[test]
    fn test_optional_fields_not_required() {
        let mut inquiry = jane();
        inquiry.company.clear();
        inquiry.phone.clear();
        inquiry.budget = None;
        inquiry.timeline = None;
        assert!(inquiry.validate().is_ok());
    }

    #[test]
    fn test_whitespace_is_empty() {
        let mut inquiry = jane();
        inquiry.name = "   ".to_string();
        let err = inquiry.validate().unwrap_err();
        assert_eq!(err.missing, vec![Required::Name]);
    }

    #[test]
    fn test_empty_inquiry_lists_everything() {
        let err = Inquiry::default().validate().unwrap_err();
        assert_eq!(
            err.missing,
            vec![
                Required::Name,
                Required::Email,
                Required::Services,
                Required::Subject,
                Required::Message
            ]
        );
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Name, Email, Services, Subject, and Message."
        );
    }

    #[test]
    fn test_toggle_service_twice() {
        let mut inquiry = jane();
        let before = inquiry.clone();

        inquiry.toggle_service("Team Training");
        assert!(inquiry.services.contains("Team Training"));
        assert_eq!(inquiry.name, before.name);
        inquiry.toggle_service("Team Training");
        assert_eq!(inquiry, before);

        inquiry.toggle_service("Other");
        assert!(inquiry.services.is_empty());
        inquiry.toggle_service("Other");
        assert_eq!(inquiry, before);
    }

    #[test]
    fn test_seeded() {
        assert!(Inquiry::seeded(None).services.is_empty());
        assert!(Inquiry::seeded(Some("")).services.is_empty());
        let inquiry = Inquiry::seeded(Some("Team Training"));
        assert_eq!(inquiry.services_joined(), "Team Training");
    }

    #[test]
    fn test_labels_round_trip() {
        for budget in Budget::iter() {
            assert_eq!(budget.to_string().parse::<Budget>(), Ok(budget));
        }
        assert_eq!("6+ months".parse::<Timeline>(), Ok(Timeline::SixPlusMonths));
        assert!("Soon".parse::<Timeline>().is_err());
    }

    #[test]
    fn test_json_uses_labels() {
        let mut inquiry = jane();
        inquiry.budget = Some(Budget::Under5k);
        let json = serde_json::to_value(&inquiry).unwrap();
        assert_eq!(json["budget"], "Under $5,000");
        assert_eq!(json["services"], serde_json::json!(["Other"]));

        let parsed: Inquiry = serde_json::from_str(r#"{"name":"Jane"}"#).unwrap();
        assert_eq!(parsed.name, "Jane");
        assert!(parsed.services.is_empty());
    }
}
