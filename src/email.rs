use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{
    recipients::client_email_addresses,
    templates::{render_account_creation, render_invoice, render_update},
    ActivityUpdate, ApiClient, ApiError, ApiRequest, ClientContact, DeliveryReport, Invoice,
    InvoiceAttachment, NewAccount, RenderedEmail, SentEmail,
};

pub const DEFAULT_FROM_EMAIL: &str = "onboarding@resend.dev";
pub const DEFAULT_FROM_NAME: &str = "MillionCXO";
pub const DEFAULT_APP_URL: &str = "http://localhost:3001";
pub const DEFAULT_API_BASE_URL: &str = "https://api.resend.com";
/// Largest attachment the provider accepts.
pub const MAX_ATTACHMENT_BYTES: usize = 20 * 1024 * 1024;

/// Error type for email delivery.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// The application was started without email configuration.
    #[error("email delivery is not configured")]
    NotConfigured,
    /// A required environment variable is missing or blank.
    #[error("missing email configuration: {0}")]
    MissingConfig(String),
    #[error("attachment of {size} bytes exceeds the {max} byte limit")]
    AttachmentTooLarge { size: usize, max: usize },
    /// The provider call failed.
    #[error("email API error: {0}")]
    Api(#[from] ApiError),
}

impl EmailError {
    /// Message suitable for a per-recipient error entry.
    ///
    /// Prefers the provider's own `message` field over the generic one.
    pub fn provider_message(&self) -> String {
        match self {
            Self::Api(err) => err
                .body()
                .and_then(|body| body.get("message"))
                .and_then(JsonValue::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| err.message().to_owned()),
            other => other.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Settings for the Resend email API.
pub struct EmailConfig {
    pub api_key: String,
    pub from_email: String,
    pub from_name: String,
    /// Dashboard URL used in login links.
    pub app_url: String,
    pub api_base_url: String,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &"<redacted>")
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("app_url", &self.app_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl EmailConfig {
    /// Creates a config with default sender, app URL and API base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            from_email: DEFAULT_FROM_EMAIL.to_owned(),
            from_name: DEFAULT_FROM_NAME.to_owned(),
            app_url: DEFAULT_APP_URL.to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
        }
    }

    /// Creates a config from environment variables.
    ///
    /// Reads:
    /// - `RESEND_API_KEY` (required)
    /// - `RESEND_FROM_EMAIL` (default `onboarding@resend.dev`)
    /// - `APP_URL` (default `http://localhost:3001`)
    pub fn from_env() -> Result<Self, EmailError> {
        let api_key = std::env::var("RESEND_API_KEY")
            .map_err(|_| EmailError::MissingConfig("RESEND_API_KEY".to_owned()))?;
        if api_key.trim().is_empty() {
            return Err(EmailError::MissingConfig(
                "RESEND_API_KEY is set but empty".to_owned(),
            ));
        }

        let mut config = Self::new(api_key.trim());
        if let Some(from_email) = non_blank_env("RESEND_FROM_EMAIL") {
            config.from_email = from_email;
        }
        if let Some(app_url) = non_blank_env("APP_URL") {
            config.app_url = app_url;
        }
        Ok(config)
    }

    pub fn with_from(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.from_name = name.into();
        self.from_email = email.into();
        self
    }

    pub fn with_app_url(mut self, app_url: impl Into<String>) -> Self {
        self.app_url = app_url.into();
        self
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// `Name <email>` sender header.
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// One message handed to the provider.
#[derive(Clone, Debug)]
pub struct OutgoingEmail<'a> {
    pub to: &'a str,
    pub subject: &'a str,
    pub body: &'a RenderedEmail,
    pub attachment: Option<&'a InvoiceAttachment>,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentPayload<'a>>,
}

#[derive(Serialize)]
struct AttachmentPayload<'a> {
    filename: &'a str,
    content: String,
}

#[derive(Clone, Debug)]
/// Sends MillionCXO notification emails through the Resend API.
pub struct Mailer {
    api: ApiClient,
    config: EmailConfig,
}

impl Mailer {
    pub fn new(api: ApiClient, config: EmailConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Sends a single email.
    ///
    /// Never retried: a resend after an ambiguous failure could deliver twice.
    pub async fn send(&self, email: &OutgoingEmail<'_>) -> Result<SentEmail, EmailError> {
        let payload = SendEmailRequest {
            from: self.config.sender(),
            to: [email.to],
            subject: email.subject,
            html: &email.body.html,
            text: &email.body.text,
            attachments: email
                .attachment
                .map(|attachment| AttachmentPayload {
                    filename: &attachment.filename,
                    content: STANDARD.encode(&attachment.content),
                })
                .into_iter()
                .collect(),
        };

        let url = format!("{}/emails", self.config.api_base_url.trim_end_matches('/'));
        let request = ApiRequest::post(url)
            .bearer(&self.config.api_key)
            .json(&payload)?
            .skip_retry();

        Ok(self.api.fetch_json::<SentEmail>(request).await?)
    }

    /// Notifies every address of `client` about a new activity update.
    ///
    /// Each recipient gets its own email; a failure for one recipient is
    /// recorded in the report and does not stop the others.
    pub async fn send_update_email(
        &self,
        client: &ClientContact,
        update: &ActivityUpdate,
    ) -> DeliveryReport {
        let body = render_update(client, update);
        let subject = format!("Update: {}", update.title);
        self.fan_out(client, &subject, &body, None).await
    }

    /// Mails login credentials to a newly created account.
    pub async fn send_account_creation_email(
        &self,
        account: &NewAccount,
    ) -> Result<SentEmail, EmailError> {
        let base = account
            .login_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(self.config.app_url.as_str());
        let login_url = format!("{}/login", base.trim().trim_end_matches('/'));

        let body = render_account_creation(account, &login_url);
        let email = OutgoingEmail {
            to: &account.user_email,
            subject: "Welcome to MillionCXO - Your Account Details",
            body: &body,
            attachment: None,
        };

        match self.send(&email).await {
            Ok(sent) => {
                #[cfg(feature = "tracing")]
                tracing::info!(
                    user_email = %account.user_email,
                    role = %account.role,
                    email_id = %sent.id,
                    "account creation email sent"
                );
                Ok(sent)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    user_email = %account.user_email,
                    error = %err,
                    "failed to send account creation email"
                );
                Err(err)
            }
        }
    }

    /// Mails an invoice with its PDF to every address of `client`.
    ///
    /// Fails before any network call if the attachment is over
    /// [`MAX_ATTACHMENT_BYTES`].
    pub async fn send_invoice_email(
        &self,
        client: &ClientContact,
        invoice: &Invoice,
        attachment: &InvoiceAttachment,
    ) -> Result<DeliveryReport, EmailError> {
        let size = attachment.content.len();
        if size > MAX_ATTACHMENT_BYTES {
            #[cfg(feature = "tracing")]
            tracing::error!(
                invoice_number = %invoice.invoice_number,
                size,
                max = MAX_ATTACHMENT_BYTES,
                "invoice PDF too large for email attachment"
            );
            return Err(EmailError::AttachmentTooLarge {
                size,
                max: MAX_ATTACHMENT_BYTES,
            });
        }

        let body = render_invoice(client, invoice);
        let subject = format!("Invoice {} from MillionCXO", invoice.invoice_number);
        Ok(self.fan_out(client, &subject, &body, Some(attachment)).await)
    }

    async fn fan_out(
        &self,
        client: &ClientContact,
        subject: &str,
        body: &RenderedEmail,
        attachment: Option<&InvoiceAttachment>,
    ) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for recipient in client_email_addresses(client) {
            let email = OutgoingEmail {
                to: &recipient,
                subject,
                body,
                attachment,
            };
            match self.send(&email).await {
                Ok(_sent) => {
                    #[cfg(feature = "tracing")]
                    tracing::info!(email = %recipient, subject, email_id = %_sent.id, "email sent");
                    report.sent_to.push(recipient);
                }
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(email = %recipient, subject, error = %err, "failed to send email");
                    report
                        .errors
                        .push(format!("{recipient}: {}", err.provider_message()));
                }
            }
        }

        report
    }
}
