//! HTML and plain-text bodies for MillionCXO notification emails.
//!
//! Every template shares the same branded header and footer. Interpolated
//! values are HTML-escaped in the HTML body and used verbatim in the text
//! body.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{ActivityUpdate, ClientContact, Invoice, NewAccount, RenderedEmail};

const FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif";
const LABEL_STYLE: &str = "margin: 0 0 6px 0; font-size: 12px; font-weight: 600; color: #71717a; text-transform: uppercase; letter-spacing: 0.3px;";
const MONO_VALUE_STYLE: &str = "margin: 0; padding: 12px 16px; background-color: #ffffff; border: 1px solid #e4e4e7; border-radius: 6px; font-size: 14px; color: #18181b; font-family: 'SF Mono', Monaco, monospace;";

const TEXT_FOOTER: &str = "---\nMillionCXO · Your Growth Partner\n\nThis is an automated message. Please do not reply to this email.";

/// Welcome email carrying the login credentials of a new account.
pub fn render_account_creation(account: &NewAccount, login_url: &str) -> RenderedEmail {
    let role_label = account.role.label();
    let user_name = escape_html(&account.user_name);
    let user_email = escape_html(&account.user_email);
    let password = escape_html(&account.password);
    let href = escape_html(login_url);

    let content = format!(
        r#"<h1 style="margin: 0 0 8px 0; font-size: 22px; font-weight: 600; color: #18181b;">Welcome to MillionCXO!</h1>
              <p style="margin: 0 0 32px 0; font-size: 15px; color: #71717a; line-height: 1.5;">Hello {user_name}, your <strong style="color: #3f3f46;">{role_label}</strong> account has been created.</p>
              <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #fafafa; border-radius: 8px; border: 1px solid #e4e4e7;">
                <tr>
                  <td style="padding: 24px;">
                    <p style="margin: 0 0 20px 0; font-size: 13px; font-weight: 600; color: #3f3f46; text-transform: uppercase; letter-spacing: 0.5px;">Your Login Credentials</p>
                    <p style="{LABEL_STYLE}">Email Address</p>
                    <p style="{MONO_VALUE_STYLE}">{user_email}</p>
                    <p style="{LABEL_STYLE} margin-top: 16px;">Password</p>
                    <p style="{MONO_VALUE_STYLE}">{password}</p>
                    <p style="{LABEL_STYLE} margin-top: 16px;">Role</p>
                    <span style="display: inline-block; padding: 6px 14px; background-color: #18181b; color: #ffffff; border-radius: 4px; font-size: 12px; font-weight: 600;">{role_label}</span>
                  </td>
                </tr>
              </table>
              <table width="100%" cellpadding="0" cellspacing="0" style="margin-top: 24px; background-color: #fef9c3; border-radius: 6px; border-left: 4px solid #eab308;">
                <tr>
                  <td style="padding: 16px 20px;">
                    <p style="margin: 0; font-size: 14px; color: #854d0e; line-height: 1.5;"><strong>Security Notice:</strong> Please change your password after your first login.</p>
                  </td>
                </tr>
              </table>
              <table width="100%" cellpadding="0" cellspacing="0" style="margin-top: 32px;">
                <tr>
                  <td align="center">
                    <a href="{href}" style="display: inline-block; padding: 14px 32px; background-color: #18181b; color: #ffffff; text-decoration: none; border-radius: 6px; font-size: 14px; font-weight: 600;">Login to Dashboard →</a>
                  </td>
                </tr>
              </table>
              <p style="margin: 32px 0 0 0; font-size: 14px; color: #71717a; line-height: 1.5; text-align: center;">If you have any questions, please contact your administrator.</p>"#
    );

    let text = format!(
        "Welcome to MillionCXO, {name}!\n\n\
         Your {role_label} account has been created. Here are your login credentials:\n\n\
         Email Address: {email}\n\
         Password: {password}\n\
         Role: {role_label}\n\n\
         Security Notice: Please change your password after your first login.\n\n\
         Login URL: {login_url}\n\n\
         If you have any questions, please contact your administrator.\n\n\
         {TEXT_FOOTER}",
        name = account.user_name,
        email = account.user_email,
        password = account.password,
    );

    RenderedEmail {
        html: layout("Welcome to MillionCXO", "", &content),
        text,
    }
}

/// Activity update an SDR posted for a client.
pub fn render_update(client: &ClientContact, update: &ActivityUpdate) -> RenderedEmail {
    let type_label = update.kind.label();
    let formatted_date = format_date_time(&update.date);

    let content = format!(
        r#"<h1 style="margin: 0 0 8px 0; font-size: 20px; font-weight: 600; color: #18181b;">New Update for {business}</h1>
              <p style="margin: 0 0 32px 0; font-size: 15px; color: #71717a; line-height: 1.5;">Hello {contact}, you have a new update from your account manager.</p>
              <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #fafafa; border-radius: 8px; border: 1px solid #e4e4e7;">
                <tr>
                  <td style="padding: 24px;">
                    <span style="display: inline-block; background-color: #a19250; color: #ffffff; padding: 4px 12px; border-radius: 4px; font-size: 11px; font-weight: 600; text-transform: uppercase; letter-spacing: 0.5px;">{type_label}</span>
                    <h2 style="margin: 16px 0 0 0; font-size: 18px; font-weight: 600; color: #18181b; line-height: 1.4;">{title}</h2>
                    <p style="margin: 12px 0 0 0; font-size: 14px; color: #3f3f46; line-height: 1.6;">{description}</p>
                    <p style="margin: 20px 0 0 0; padding-top: 16px; border-top: 1px solid #e4e4e7; font-size: 13px; color: #71717a;"><strong style="color: #3f3f46;">Date:</strong> {formatted_date}</p>
                    <p style="margin: 4px 0 0 0; font-size: 13px; color: #71717a;"><strong style="color: #3f3f46;">From:</strong> {sdr}</p>
                  </td>
                </tr>
              </table>
              <p style="margin: 32px 0 0 0; font-size: 14px; color: #71717a; line-height: 1.5;">View all your updates and more details in your MillionCXO dashboard.</p>"#,
        business = escape_html(&client.business_name),
        contact = escape_html(&client.point_of_contact_name),
        type_label = escape_html(type_label),
        title = escape_html(&update.title),
        description = line_breaks(&escape_html(&update.description)),
        sdr = escape_html(&update.sdr_name),
    );

    let text = format!(
        "Hello {contact},\n\n\
         You have received a new update from your SDR regarding {business}.\n\n\
         {type_label}: {title}\n\n\
         {description}\n\n\
         Date: {formatted_date}\n\
         From: {sdr}\n\n\
         View all your updates in your MillionCXO dashboard.\n\n\
         {TEXT_FOOTER}",
        contact = client.point_of_contact_name,
        business = client.business_name,
        title = update.title,
        description = update.description,
        sdr = update.sdr_name,
    );

    RenderedEmail {
        html: layout("Update from MillionCXO", "", &content),
        text,
    }
}

/// Invoice notice; the PDF itself travels as an attachment.
pub fn render_invoice(client: &ClientContact, invoice: &Invoice) -> RenderedEmail {
    let invoice_date = format_long_date(invoice.invoice_date);
    let due_date = format_long_date(invoice.due_date);
    let amount = format_currency(invoice.amount, &invoice.currency);
    let description = invoice
        .description
        .as_deref()
        .filter(|description| !description.is_empty());

    let description_html = description
        .map(|description| {
            format!(
                r#"<p style="{LABEL_STYLE} margin-top: 24px;">Description</p>
                    <p style="margin: 0; font-size: 14px; color: #3f3f46; line-height: 1.5;">{}</p>"#,
                line_breaks(&escape_html(description))
            )
        })
        .unwrap_or_default();

    let content = format!(
        r#"<h1 style="margin: 0 0 8px 0; font-size: 20px; font-weight: 600; color: #18181b;">Invoice for {business}</h1>
              <p style="margin: 0 0 32px 0; font-size: 15px; color: #71717a; line-height: 1.5;">Hello {contact}, please find your invoice details below.</p>
              <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #fafafa; border-radius: 8px; border: 1px solid #e4e4e7;">
                <tr>
                  <td style="padding: 24px;">
                    <p style="{LABEL_STYLE}">Invoice Number</p>
                    <p style="margin: 0 0 24px 0; padding-bottom: 24px; border-bottom: 1px solid #e4e4e7; font-size: 18px; font-weight: 700; color: #18181b;">{number}</p>
                    <table width="100%" cellpadding="0" cellspacing="0">
                      <tr>
                        <td width="50%" valign="top">
                          <p style="{LABEL_STYLE}">Invoice Date</p>
                          <p style="margin: 0; font-size: 14px; font-weight: 500; color: #3f3f46;">{invoice_date}</p>
                        </td>
                        <td width="50%" valign="top">
                          <p style="{LABEL_STYLE}">Due Date</p>
                          <p style="margin: 0; font-size: 14px; font-weight: 500; color: #3f3f46;">{due_date}</p>
                        </td>
                      </tr>
                    </table>
                    {description_html}
                    <table width="100%" cellpadding="0" cellspacing="0" style="margin-top: 24px; background-color: #18181b; border-radius: 8px;">
                      <tr>
                        <td style="padding: 24px; text-align: center;">
                          <p style="margin: 0 0 4px 0; font-size: 12px; font-weight: 600; color: #a1a1aa; text-transform: uppercase; letter-spacing: 1px;">Amount Due</p>
                          <p style="margin: 0; font-size: 32px; font-weight: 700; color: #ffffff;">{amount}</p>
                        </td>
                      </tr>
                    </table>
                  </td>
                </tr>
              </table>
              <table width="100%" cellpadding="0" cellspacing="0" style="margin-top: 24px; background-color: #f0fdf4; border-radius: 6px; border-left: 4px solid #22c55e;">
                <tr>
                  <td style="padding: 16px 20px;">
                    <p style="margin: 0; font-size: 14px; color: #166534; line-height: 1.5;"><strong>Attachment:</strong> A PDF copy of this invoice is attached to this email.</p>
                  </td>
                </tr>
              </table>
              <p style="margin: 32px 0 0 0; font-size: 14px; color: #71717a; line-height: 1.5;">If you have any questions about this invoice, please contact your account manager.</p>"#,
        business = escape_html(&client.business_name),
        contact = escape_html(&client.point_of_contact_name),
        number = escape_html(&invoice.invoice_number),
        amount = escape_html(&amount),
    );

    let description_text = description
        .map(|description| format!("Description: {description}\n"))
        .unwrap_or_default();
    let text = format!(
        "Hello {contact},\n\n\
         Please find your invoice details for {business}.\n\n\
         Invoice Number: {number}\n\
         Invoice Date: {invoice_date}\n\
         Due Date: {due_date}\n\
         {description_text}\
         Amount Due: {amount}\n\n\
         Attachment: A PDF copy of this invoice is attached to this email.\n\n\
         If you have any questions, please contact your account manager.\n\n\
         {TEXT_FOOTER}",
        contact = client.point_of_contact_name,
        business = client.business_name,
        number = invoice.invoice_number,
    );

    let header_badge = r#"<td align="right"><span style="font-size: 12px; font-weight: 600; color: #71717a; text-transform: uppercase; letter-spacing: 1px;">Invoice</span></td>"#;
    RenderedEmail {
        html: layout(
            &format!("Invoice {} from MillionCXO", escape_html(&invoice.invoice_number)),
            header_badge,
            &content,
        ),
        text,
    }
}

/// Wraps `content` in the branded page shell. `title` must already be escaped.
fn layout(title: &str, header_extra: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
</head>
<body style="margin: 0; padding: 0; font-family: {FONT_STACK}; background-color: #f4f4f5;">
  <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f4f4f5; padding: 40px 20px;">
    <tr>
      <td align="center">
        <table width="100%" cellpadding="0" cellspacing="0" style="max-width: 560px; background-color: #ffffff; border-radius: 8px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,0.1);">
          <tr>
            <td style="padding: 32px 40px; border-bottom: 1px solid #e4e4e7;">
              <table width="100%" cellpadding="0" cellspacing="0">
                <tr>
                  <td>
                    <span style="font-size: 24px; font-weight: 700; color: #18181b; letter-spacing: -0.5px;">Million</span><span style="font-size: 24px; font-weight: 700; color: #a19250; letter-spacing: -0.5px;">CXO</span>
                  </td>
                  {header_extra}
                </tr>
              </table>
            </td>
          </tr>
          <tr>
            <td style="padding: 40px;">
              {content}
            </td>
          </tr>
          <tr>
            <td style="padding: 24px 40px; background-color: #fafafa; border-top: 1px solid #e4e4e7;">
              <p style="margin: 0; font-size: 13px; color: #71717a; text-align: center;">
                <span style="font-weight: 600; color: #3f3f46;">MillionCXO</span> · Your Growth Partner
              </p>
              <p style="margin: 8px 0 0 0; font-size: 12px; color: #a1a1aa; text-align: center;">
                This is an automated message. Please do not reply to this email.
              </p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#
    )
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn line_breaks(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\n', "<br>")
}

/// `March 5, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `March 5, 2026 at 03:30 PM` (UTC)
pub fn format_date_time(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y at %I:%M %p").to_string()
}

/// en-US currency style: `$1,500.00`, `-€12.50`, `CAD 99.00`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let code = match currency.trim() {
        "" => "USD".to_owned(),
        code => code.to_ascii_uppercase(),
    };
    let prefix = match code.as_str() {
        "USD" => "$".to_owned(),
        "EUR" => "€".to_owned(),
        "GBP" => "£".to_owned(),
        "INR" => "₹".to_owned(),
        "JPY" => "¥".to_owned(),
        other => format!("{other}\u{a0}"),
    };
    let decimals = if code == "JPY" { 0 } else { 2 };

    let fixed = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{prefix}{grouped}.{fraction}"),
        None => format!("{sign}{prefix}{grouped}"),
    }
}
