//! End-to-end delivery through a real SMTP server
//!
//! Runs the SMTP provider against a Mailpit container and reads the captured
//! message back through Mailpit's REST API. Requires Docker:
//!
//! ```bash
//! cargo test -p domain_contact --test mailpit_delivery_test -- --ignored
//! ```

use core_config::smtp::SmtpEnv;
use domain_contact::*;
use serde_json::Value;
use test_utils::{TestDataBuilder, TestMailpit};

fn settings(mailpit: &TestMailpit, mailbox: &str) -> SmtpEnv {
    SmtpEnv {
        host: Some(mailpit.host().to_string()),
        port: Some(mailpit.smtp_port().to_string()),
        username: Some(mailbox.to_string()),
        password: Some("any-password".to_string()),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_contact_email_is_captured_by_mailpit() {
    let mailpit = TestMailpit::new().await;
    let builder = TestDataBuilder::from_test_name("mailpit_delivery");
    let mailbox = builder.mailbox();

    let service =
        ContactService::from_settings(&settings(&mailpit, &mailbox), ContactServiceConfig::default())
            .unwrap();
    assert!(service.config_error().is_none());

    let submission = ContactSubmission::new(
        builder.visitor_name(),
        builder.visitor_email(),
        builder.message("the placement cell"),
    );
    let result = service.submit(&submission).await;
    assert!(result.is_success(), "{result:?}");

    let listing: Value = reqwest::get(mailpit.messages_url())
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["total"], 1);

    let captured = &listing["messages"][0];
    assert_eq!(
        captured["Subject"],
        format!("New Contact Form Submission from {}", builder.visitor_name())
    );
    assert_eq!(captured["From"]["Name"], "KITS Campus Guide");
    assert_eq!(captured["From"]["Address"], mailbox.as_str());
    assert_eq!(captured["To"][0]["Address"], mailbox.as_str());

    let message_id = result.message_id().unwrap();
    assert_eq!(
        format!("<{}>", captured["MessageID"].as_str().unwrap()),
        message_id
    );

    let detail: Value = reqwest::get(mailpit.message_url(captured["ID"].as_str().unwrap()))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(detail["Text"]
        .as_str()
        .unwrap()
        .contains(&builder.message("the placement cell")));
    assert!(detail["HTML"]
        .as_str()
        .unwrap()
        .contains(&format!("mailto:{}", builder.visitor_email())));
}
