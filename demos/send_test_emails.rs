//! Sends one of each notification email to `TEST_EMAIL`.
//!
//! Run with `RESEND_API_KEY=... TEST_EMAIL=you@example.com cargo run --example send_test_emails`.

use std::time::Duration;

use chrono::{Days, Utc};
use millioncxo_api::{
    ActivityUpdate, AppContext, ClientContact, Invoice, InvoiceAttachment, NewAccount, Role,
    UpdateType,
};
use tracing_subscriber::EnvFilter;

// The provider allows two requests per second.
const PAUSE: Duration = Duration::from_millis(1_500);

const DUMMY_PDF: &[u8] = b"%PDF-1.4\n1 0 obj<</Type/Catalog/Pages 2 0 R>>endobj\n2 0 obj<</Type/Pages/Kids[3 0 R]/Count 1>>endobj\n3 0 obj<</Type/Page/MediaBox[0 0 612 792]/Parent 2 0 R/Resources<<>>>>endobj\nxref\n0 4\ntrailer<</Size 4/Root 1 0 R>>\nstartxref\n100\n%%EOF";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let test_email = std::env::var("TEST_EMAIL")?;
    let ctx = AppContext::from_env();
    let mailer = ctx.mailer()?;
    println!("sender: {}", mailer.config().sender());

    let client = ClientContact {
        business_name: "Test Business Inc.".to_owned(),
        point_of_contact_name: "John Doe".to_owned(),
        point_of_contact_email: test_email.clone(),
        additional_emails: Vec::new(),
    };

    let report = mailer
        .send_update_email(
            &client,
            &ActivityUpdate {
                kind: UpdateType::Meeting,
                title: "Test Update - Quarterly Review Meeting".to_owned(),
                description: "This is a test update to verify email functionality.".to_owned(),
                date: Utc::now(),
                sdr_name: "Jane Smith".to_owned(),
                sdr_email: None,
            },
        )
        .await;
    println!("update email: sent to {:?}, errors {:?}", report.sent_to, report.errors);

    tokio::time::sleep(PAUSE).await;

    match mailer
        .send_account_creation_email(&NewAccount {
            user_name: "Test User".to_owned(),
            user_email: test_email.clone(),
            password: "TestPassword123!".to_owned(),
            role: Role::Sdr,
            login_url: None,
        })
        .await
    {
        Ok(sent) => println!("account creation email: {}", sent.id),
        Err(err) => println!("account creation email failed: {}", err.provider_message()),
    }

    tokio::time::sleep(PAUSE).await;

    let today = Utc::now().date_naive();
    let report = mailer
        .send_invoice_email(
            &client,
            &Invoice {
                invoice_number: "INV-TEST-01".to_owned(),
                amount: 1500.0,
                currency: "USD".to_owned(),
                invoice_date: today,
                due_date: today.checked_add_days(Days::new(30)).unwrap_or(today),
                description: Some("Monthly service invoice - Test".to_owned()),
            },
            &InvoiceAttachment {
                filename: "invoice-test.pdf".to_owned(),
                content: DUMMY_PDF.to_vec(),
            },
        )
        .await?;
    println!("invoice email: sent to {:?}, errors {:?}", report.sent_to, report.errors);

    Ok(())
}
