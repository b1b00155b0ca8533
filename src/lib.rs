//! `millioncxo-api` is the HTTP plumbing of the MillionCXO dashboard.
//!
//! - [`ApiClient::fetch`] sends a request with a per-attempt timeout, retries
//!   5xx and transport failures with linear backoff, and reports failures as
//!   a closed [`ApiError`].
//! - [`Mailer`] renders and delivers account, activity-update and invoice
//!   notification emails through the Resend API.
//! - [`AppContext`] holds both, built once at startup.

mod client;
mod context;
mod email;
mod error;
mod options;
mod outcome;
mod recipients;
mod request;
mod retry;
pub mod templates;
mod types;

pub use client::ApiClient;
pub use context::AppContext;
pub use email::{
    EmailConfig, EmailError, Mailer, OutgoingEmail, DEFAULT_API_BASE_URL, DEFAULT_APP_URL,
    DEFAULT_FROM_EMAIL, DEFAULT_FROM_NAME, MAX_ATTACHMENT_BYTES,
};
pub use error::{ApiError, TIMEOUT_MESSAGE};
pub use options::{ClientOptions, FetchOptions, DEFAULT_RETRIES, DEFAULT_TIMEOUT_MS, RETRY_DELAY_MS};
pub use recipients::{client_email_addresses, is_valid_email};
pub use request::{resolve_url, ApiRequest};
pub use retry::backoff_delay;
pub use types::{
    ActivityUpdate, ClientContact, DeliveryReport, Invoice, InvoiceAttachment, NewAccount,
    RenderedEmail, Role, SentEmail, UpdateType,
};

pub use reqwest::{Method, Response, StatusCode};

pub type Result<T> = std::result::Result<T, ApiError>;
