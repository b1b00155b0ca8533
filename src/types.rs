use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Portal role of a dashboard account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Sdr,
    Client,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Sdr => "Sales Development Representative",
            Self::Client => "Client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "ADMIN",
            Self::Sdr => "SDR",
            Self::Client => "CLIENT",
        })
    }
}

/// Kind of activity an SDR logged for a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateType {
    Call,
    Email,
    Meeting,
    Note,
    Report,
    Other,
    /// Any kind the dashboard sends that this crate does not know.
    Custom(String),
}

impl UpdateType {
    /// Parses case-insensitively; unknown kinds are kept verbatim.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CALL" => Self::Call,
            "EMAIL" => Self::Email,
            "MEETING" => Self::Meeting,
            "NOTE" => Self::Note,
            "REPORT" => Self::Report,
            "OTHER" => Self::Other,
            _ => Self::Custom(value.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Call => "Phone Call",
            Self::Email => "Email",
            Self::Meeting => "Meeting",
            Self::Note => "Note",
            Self::Report => "Report",
            Self::Other => "Update",
            Self::Custom(value) => value.as_str(),
        }
    }
}

impl From<&str> for UpdateType {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Serialize for UpdateType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            Self::Call => "CALL",
            Self::Email => "EMAIL",
            Self::Meeting => "MEETING",
            Self::Note => "NOTE",
            Self::Report => "REPORT",
            Self::Other => "OTHER",
            Self::Custom(value) => value.as_str(),
        };
        serializer.serialize_str(value)
    }
}

impl<'de> Deserialize<'de> for UpdateType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Contact details of a client business.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientContact {
    pub business_name: String,
    pub point_of_contact_name: String,
    pub point_of_contact_email: String,
    #[serde(default)]
    pub additional_emails: Vec<String>,
}

/// An activity update an SDR posted for a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    #[serde(rename = "type")]
    pub kind: UpdateType,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub sdr_name: String,
    #[serde(default)]
    pub sdr_email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_number: String,
    pub amount: f64,
    /// ISO 4217 code; empty means USD.
    #[serde(default)]
    pub currency: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

/// A freshly created account whose credentials are mailed to its owner.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_name: String,
    pub user_email: String,
    pub password: String,
    pub role: Role,
    /// Overrides the configured app URL; `/login` is appended.
    #[serde(default)]
    pub login_url: Option<String>,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("user_name", &self.user_name)
            .field("user_email", &self.user_email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("login_url", &self.login_url)
            .finish()
    }
}

/// PDF attached to an invoice email.
#[derive(Clone, PartialEq, Eq)]
pub struct InvoiceAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

impl fmt::Debug for InvoiceAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvoiceAttachment")
            .field("filename", &self.filename)
            .field("len", &self.content.len())
            .finish()
    }
}

/// HTML and plain-text bodies of one email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

/// Provider acknowledgement for one delivered email.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SentEmail {
    pub id: String,
}

/// Result of a fan-out send to every address of a client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent_to: Vec<String>,
    /// One `"<email>: <message>"` entry per failed recipient.
    pub errors: Vec<String>,
}

impl DeliveryReport {
    /// At least one recipient received the email.
    pub fn is_success(&self) -> bool {
        !self.sent_to.is_empty()
    }
}
