mod common;

use axum::http::StatusCode;
use chrono::{NaiveDate, TimeZone, Utc};
use millioncxo_api::{
    ActivityUpdate, ApiClient, AppContext, ClientContact, ClientOptions, EmailConfig, EmailError,
    Invoice, InvoiceAttachment, Mailer, NewAccount, Role, UpdateType, MAX_ATTACHMENT_BYTES,
};
use serde_json::json;

use common::{spawn_server, MockResponse, TestServer};

fn mailer(server: &TestServer) -> Mailer {
    let api = ApiClient::new().with_options(ClientOptions {
        timeout_ms: 2_000,
        max_retries: 2,
        retry_delay_ms: 1,
    });
    let config = EmailConfig::new("re_test_key")
        .with_from("MillionCXO", "updates@millioncxo.com")
        .with_app_url("https://app.millioncxo.com/")
        .with_api_base_url(server.base_url.clone());
    Mailer::new(api, config)
}

fn client(additional: &[&str]) -> ClientContact {
    ClientContact {
        business_name: "Test Business Inc.".to_owned(),
        point_of_contact_name: "John Doe".to_owned(),
        point_of_contact_email: "john@test.com".to_owned(),
        additional_emails: additional.iter().map(|email| (*email).to_owned()).collect(),
    }
}

fn update() -> ActivityUpdate {
    ActivityUpdate {
        kind: UpdateType::Meeting,
        title: "Quarterly Review Meeting".to_owned(),
        description: "The meeting was scheduled for next week.".to_owned(),
        date: Utc
            .with_ymd_and_hms(2026, 10, 17, 14, 0, 0)
            .single()
            .expect("valid timestamp"),
        sdr_name: "Jane Smith".to_owned(),
        sdr_email: Some("jane@millioncxo.com".to_owned()),
    }
}

fn invoice() -> Invoice {
    Invoice {
        invoice_number: "INV-TEST-2026-01".to_owned(),
        amount: 1500.0,
        currency: "USD".to_owned(),
        invoice_date: NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date"),
        due_date: NaiveDate::from_ymd_opt(2026, 11, 16).expect("valid date"),
        description: Some("Monthly service invoice".to_owned()),
    }
}

fn sent(id: &str) -> MockResponse {
    MockResponse::json(StatusCode::OK, json!({ "id": id }))
}

#[tokio::test]
async fn update_email_goes_to_every_recipient() {
    let server = spawn_server(vec![sent("em_1"), sent("em_2")]).await;

    let report = mailer(&server)
        .send_update_email(&client(&["Ops@Test.com", "invalid"]), &update())
        .await;

    assert!(report.is_success());
    assert_eq!(report.sent_to, vec!["john@test.com", "ops@test.com"]);
    assert!(report.errors.is_empty());

    let recorded = server.recorded();
    assert_eq!(recorded.len(), 2);
    let first = recorded[0].json();
    assert_eq!(first["from"], "MillionCXO <updates@millioncxo.com>");
    assert_eq!(first["to"], json!(["john@test.com"]));
    assert_eq!(first["subject"], "Update: Quarterly Review Meeting");
    assert!(first["html"]
        .as_str()
        .expect("html must be a string")
        .contains("New Update for Test Business Inc."));
    assert!(first["text"]
        .as_str()
        .expect("text must be a string")
        .contains("Meeting: Quarterly Review Meeting"));
    assert!(first.get("attachments").is_none());
    assert_eq!(
        recorded[0].authorization.as_deref(),
        Some("Bearer re_test_key")
    );
    assert_eq!(recorded[1].json()["to"], json!(["ops@test.com"]));
}

#[tokio::test]
async fn failed_recipient_is_reported_and_others_still_sent() {
    let server = spawn_server(vec![
        MockResponse::json(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "You can only send testing emails to your own email address."
            }),
        ),
        sent("em_2"),
    ])
    .await;

    let report = mailer(&server)
        .send_update_email(&client(&["ops@test.com"]), &update())
        .await;

    assert!(report.is_success());
    assert_eq!(report.sent_to, vec!["ops@test.com"]);
    assert_eq!(
        report.errors,
        vec!["john@test.com: You can only send testing emails to your own email address."]
    );
}

#[tokio::test]
async fn provider_server_errors_are_not_retried() {
    let server = spawn_server(vec![
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })),
        sent("em_should_not_be_used"),
    ])
    .await;

    let report = mailer(&server)
        .send_update_email(&client(&[]), &update())
        .await;

    assert!(!report.is_success());
    assert_eq!(report.errors, vec!["john@test.com: boom"]);
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn account_creation_email_uses_login_url() {
    let server = spawn_server(vec![sent("em_welcome")]).await;
    let account = NewAccount {
        user_name: "Test User".to_owned(),
        user_email: "new.sdr@millioncxo.com".to_owned(),
        password: "TestPassword123!".to_owned(),
        role: Role::Sdr,
        login_url: None,
    };

    let sent = mailer(&server)
        .send_account_creation_email(&account)
        .await
        .expect("send must succeed");

    assert_eq!(sent.id, "em_welcome");
    let body = server.recorded()[0].json();
    assert_eq!(body["to"], json!(["new.sdr@millioncxo.com"]));
    assert_eq!(
        body["subject"],
        "Welcome to MillionCXO - Your Account Details"
    );
    let text = body["text"].as_str().expect("text must be a string");
    assert!(text.contains("Login URL: https://app.millioncxo.com/login"));
    assert!(text.contains("Role: Sales Development Representative"));
}

#[tokio::test]
async fn account_creation_email_prefers_explicit_login_url() {
    let server = spawn_server(vec![sent("em_welcome")]).await;
    let account = NewAccount {
        user_name: "Client User".to_owned(),
        user_email: "owner@client.com".to_owned(),
        password: "secret".to_owned(),
        role: Role::Client,
        login_url: Some("https://portal.client.com".to_owned()),
    };

    mailer(&server)
        .send_account_creation_email(&account)
        .await
        .expect("send must succeed");

    let body = server.recorded()[0].json();
    assert!(body["html"]
        .as_str()
        .expect("html must be a string")
        .contains(r#"href="https://portal.client.com/login""#));
}

#[tokio::test]
async fn account_creation_failure_is_returned() {
    let server = spawn_server(vec![MockResponse::json(
        StatusCode::FORBIDDEN,
        json!({ "statusCode": 403, "message": "API key is invalid" }),
    )])
    .await;
    let account = NewAccount {
        user_name: "Admin".to_owned(),
        user_email: "admin@millioncxo.com".to_owned(),
        password: "secret".to_owned(),
        role: Role::Admin,
        login_url: None,
    };

    let err = mailer(&server)
        .send_account_creation_email(&account)
        .await
        .expect_err("send must fail");

    match &err {
        EmailError::Api(inner) => assert_eq!(inner.status(), Some(403)),
        other => panic!("expected api error, got {other:?}"),
    }
    assert_eq!(err.provider_message(), "API key is invalid");
}

#[tokio::test]
async fn invoice_email_attaches_pdf_for_every_recipient() {
    let server = spawn_server(vec![sent("em_1"), sent("em_2")]).await;
    let attachment = InvoiceAttachment {
        filename: "invoice-test.pdf".to_owned(),
        content: b"%PDF-1.4\n%%EOF".to_vec(),
    };

    let report = mailer(&server)
        .send_invoice_email(&client(&["billing@test.com"]), &invoice(), &attachment)
        .await
        .expect("invoice send must run");

    assert_eq!(report.sent_to, vec!["john@test.com", "billing@test.com"]);
    for recorded in server.recorded() {
        let body = recorded.json();
        assert_eq!(body["subject"], "Invoice INV-TEST-2026-01 from MillionCXO");
        assert_eq!(
            body["attachments"],
            json!([{ "filename": "invoice-test.pdf", "content": "JVBERi0xLjQKJSVFT0Y=" }])
        );
        assert!(body["text"]
            .as_str()
            .expect("text must be a string")
            .contains("Amount Due: $1,500.00"));
    }
}

#[tokio::test]
async fn oversized_invoice_attachment_is_rejected_without_network_calls() {
    let server = spawn_server(vec![sent("em_1")]).await;
    let attachment = InvoiceAttachment {
        filename: "huge.pdf".to_owned(),
        content: vec![0; MAX_ATTACHMENT_BYTES + 1],
    };

    let err = mailer(&server)
        .send_invoice_email(&client(&[]), &invoice(), &attachment)
        .await
        .expect_err("send must be rejected");

    assert!(matches!(
        err,
        EmailError::AttachmentTooLarge { size, max }
            if size == MAX_ATTACHMENT_BYTES + 1 && max == MAX_ATTACHMENT_BYTES
    ));
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn context_hands_out_the_configured_mailer() {
    let server = spawn_server(vec![sent("em_ctx")]).await;
    let config = EmailConfig::new("re_ctx_key").with_api_base_url(server.base_url.clone());
    let ctx = AppContext::new(ApiClient::new(), Some(config));

    let report = ctx
        .mailer()
        .expect("mailer must be configured")
        .send_update_email(&client(&[]), &update())
        .await;

    assert_eq!(report.sent_to, vec!["john@test.com"]);
    assert_eq!(
        server.recorded()[0].authorization.as_deref(),
        Some("Bearer re_ctx_key")
    );
}
