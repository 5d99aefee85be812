//! Email template rendering engine.
//!
//! Handlebars templates for the contact email. `{{value}}` in the HTML
//! template goes through [`escape_html`]; the plain-text template uses
//! `{{{value}}}` and receives the submission as typed.

use crate::error::{NotificationError, NotificationResult};
use crate::models::ContactEmailData;
use handlebars::Handlebars;
use std::sync::Arc;
use tracing::debug;

const CONTACT_HTML: &str = "contact_html";
const CONTACT_TEXT: &str = "contact_text";

/// Rendered email content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    /// HTML body content.
    pub html: String,
    /// Plain text body content.
    pub text: String,
    /// Email subject line.
    pub subject: String,
}

/// Escapes the five HTML-significant characters `& < > " '`.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Template engine for rendering the contact email.
#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Create a new template engine with the contact templates registered.
    pub fn new() -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(escape_html);

        handlebars
            .register_template_string(CONTACT_HTML, CONTACT_HTML_TEMPLATE)
            .map_err(|e| {
                NotificationError::TemplateError(format!("Failed to register {}: {}", CONTACT_HTML, e))
            })?;
        handlebars
            .register_template_string(CONTACT_TEXT, CONTACT_TEXT_TEMPLATE)
            .map_err(|e| {
                NotificationError::TemplateError(format!("Failed to register {}: {}", CONTACT_TEXT, e))
            })?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Render both bodies and the subject for a submission.
    ///
    /// The subject carries the name unescaped: it is a header, not markup.
    pub fn render_contact(&self, data: &ContactEmailData) -> NotificationResult<RenderedEmail> {
        debug!(name = %data.name, "Rendering contact email");

        let html = self.handlebars.render(CONTACT_HTML, data)?;
        let text = self.handlebars.render(CONTACT_TEXT, data)?;

        Ok(RenderedEmail {
            html,
            text,
            subject: format!("New Contact Form Submission from {}", data.name),
        })
    }
}

const CONTACT_TEXT_TEMPLATE: &str = r#"
New Contact Form Submission

Name: {{{name}}}
Email: {{{email}}}

Message:
{{{message}}}

---
{{{institution_name}}}
{{{form_name}}}
"#;

const CONTACT_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>New Contact Form Submission</title>
</head>
<body style="margin: 0; padding: 0; background-color: #f8f9fa; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;">
  <table role="presentation" style="width: 100%; border-collapse: collapse; background-color: #f8f9fa;">
    <tr>
      <td style="padding: 40px 20px;">
        <table role="presentation" style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 12px; overflow: hidden;">
          <tr>
            <td style="background-color: #0f172a; padding: 40px 40px 30px; text-align: center;">
              <img src="{{logo_url}}" alt="{{institution_name}} logo" style="max-width: 180px; height: auto; margin-bottom: 20px; background-color: #ffffff; padding: 12px; border-radius: 8px;" />
              <h1 style="margin: 0; color: #ffffff; font-size: 24px; font-weight: 600;">New Contact Form Submission</h1>
            </td>
          </tr>
          <tr>
            <td style="padding: 40px 40px 30px;">
              <p style="margin: 0 0 30px; color: #64748b; font-size: 16px; line-height: 1.6;">You have received a new message from the {{form_name}}.</p>
              <table role="presentation" style="width: 100%; border-collapse: separate; border-spacing: 0 16px;">
                <tr>
                  <td style="padding: 20px; background-color: #f1f5f9; border-left: 4px solid #1e293b; border-radius: 8px;">
                    <p style="margin: 0 0 8px; color: #475569; font-size: 12px; font-weight: 600; text-transform: uppercase;">Name</p>
                    <p style="margin: 0; color: #0f172a; font-size: 18px;">{{name}}</p>
                  </td>
                </tr>
                <tr>
                  <td style="padding: 20px; background-color: #f1f5f9; border-left: 4px solid #1e293b; border-radius: 8px;">
                    <p style="margin: 0 0 8px; color: #475569; font-size: 12px; font-weight: 600; text-transform: uppercase;">Email Address</p>
                    <p style="margin: 0; font-size: 18px;"><a href="mailto:{{email}}" style="color: #1e293b; text-decoration: none;">{{email}}</a></p>
                  </td>
                </tr>
                <tr>
                  <td style="padding: 20px; background-color: #f1f5f9; border-left: 4px solid #1e293b; border-radius: 8px;">
                    <p style="margin: 0 0 8px; color: #475569; font-size: 12px; font-weight: 600; text-transform: uppercase;">Message</p>
                    <p style="margin: 0; color: #0f172a; font-size: 16px; line-height: 1.7; white-space: pre-wrap;">{{message}}</p>
                  </td>
                </tr>
              </table>
              <table role="presentation" style="width: 100%; border-collapse: collapse;">
                <tr>
                  <td style="text-align: center; padding-top: 20px;">
                    <a href="mailto:{{email}}" style="display: inline-block; padding: 14px 32px; background-color: #1e293b; color: #ffffff; text-decoration: none; border-radius: 8px; font-weight: 600; font-size: 14px;">Reply to {{name}}</a>
                  </td>
                </tr>
              </table>
            </td>
          </tr>
          <tr>
            <td style="padding: 30px 40px; background-color: #f8f9fa; border-top: 1px solid #e2e8f0; text-align: center;">
              <p style="margin: 0 0 8px; color: #1e293b; font-size: 14px; font-weight: 600;">{{institution_name}}</p>
              <p style="margin: 0; color: #94a3b8; font-size: 12px;">{{form_name}}</p>
              <p style="margin: 16px 0 0; color: #cbd5e1; font-size: 11px;">This is an automated email. Please do not reply directly to this message.</p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#;
