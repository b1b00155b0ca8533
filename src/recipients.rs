use std::sync::OnceLock;

use regex::Regex;

use crate::ClientContact;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Returns `true` if `email` looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Returns every address a client notification goes to.
///
/// The primary point of contact comes first. Additional addresses are
/// trimmed, lowercased, and skipped when blank, malformed or already present.
pub fn client_email_addresses(client: &ClientContact) -> Vec<String> {
    let mut emails = vec![client.point_of_contact_email.trim().to_owned()];

    let additional = client
        .additional_emails
        .iter()
        .map(|email| email.trim())
        .filter(|email| !email.is_empty() && is_valid_email(email))
        .map(str::to_lowercase);

    for email in additional {
        if !emails.iter().any(|known| known.eq_ignore_ascii_case(&email)) {
            emails.push(email);
        }
    }

    emails
}
