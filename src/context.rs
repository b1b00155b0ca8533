use crate::{ApiClient, EmailConfig, EmailError, Mailer};

#[derive(Clone, Debug)]
/// Application-scoped dependencies, built once at startup and passed to the
/// code that needs them.
pub struct AppContext {
    api: ApiClient,
    mailer: Option<Mailer>,
}

impl AppContext {
    /// Builds a context; email stays disabled when `email` is `None`.
    pub fn new(api: ApiClient, email: Option<EmailConfig>) -> Self {
        let mailer = email.map(|config| Mailer::new(api.clone(), config));
        Self { api, mailer }
    }

    /// Builds a context from environment variables.
    ///
    /// `APP_URL`, when set, becomes the API client's base URL. A missing
    /// `RESEND_API_KEY` is logged and leaves email disabled.
    pub fn from_env() -> Self {
        let mut api = ApiClient::new();
        if let Ok(app_url) = std::env::var("APP_URL") {
            if !app_url.trim().is_empty() {
                api = api.with_base_url(app_url.trim());
            }
        }

        let email = match EmailConfig::from_env() {
            Ok(config) => Some(config),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "email sending will be disabled");
                None
            }
        };

        Self::new(api, email)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Returns the mailer, or [`EmailError::NotConfigured`] when email is disabled.
    pub fn mailer(&self) -> Result<&Mailer, EmailError> {
        self.mailer.as_ref().ok_or(EmailError::NotConfigured)
    }

    pub fn email_enabled(&self) -> bool {
        self.mailer.is_some()
    }
}
