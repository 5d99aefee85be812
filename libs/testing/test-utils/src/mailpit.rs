//! Mailpit test infrastructure
//!
//! Provides a `TestMailpit` helper that runs a local SMTP capture server.
//! Any username and password are accepted on the plain SMTP port, so the
//! contact transport can log in without TLS.

use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

const SMTP_PORT: u16 = 1025;
const HTTP_PORT: u16 = 8025;

/// Test Mailpit wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMailpit;
///
/// # async fn example() {
/// let mailpit = TestMailpit::new().await;
/// let smtp = format!("{}:{}", mailpit.host(), mailpit.smtp_port());
/// let inbox = mailpit.messages_url();
/// # }
/// ```
pub struct TestMailpit {
    #[allow(dead_code)]
    container: ContainerAsync<GenericImage>,
    host: String,
    smtp_port: u16,
    http_port: u16,
}

impl TestMailpit {
    /// Create a new test Mailpit instance
    pub async fn new() -> Self {
        // with_exposed_port must come before ImageExt methods like with_env_var
        let image = GenericImage::new("axllent/mailpit", "v1.21")
            .with_exposed_port(SMTP_PORT.tcp())
            .with_exposed_port(HTTP_PORT.tcp())
            .with_wait_for(WaitFor::message_on_either_std("accessible via"))
            .with_env_var("MP_SMTP_AUTH_ACCEPT_ANY", "1")
            .with_env_var("MP_SMTP_AUTH_ALLOW_INSECURE", "1");

        let container = AsyncRunner::start(image)
            .await
            .expect("Failed to start Mailpit container");

        tokio::time::sleep(Duration::from_millis(500)).await;

        let host = container
            .get_host()
            .await
            .expect("Failed to get Mailpit host")
            .to_string();
        let smtp_port = container
            .get_host_port_ipv4(SMTP_PORT)
            .await
            .expect("Failed to get Mailpit SMTP port");
        let http_port = container
            .get_host_port_ipv4(HTTP_PORT)
            .await
            .expect("Failed to get Mailpit HTTP port");

        tracing::info!(smtp_port, http_port, "Test Mailpit ready");

        Self {
            container,
            host,
            smtp_port,
            http_port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn smtp_port(&self) -> u16 {
        self.smtp_port
    }

    /// Mailpit REST endpoint listing captured messages
    pub fn messages_url(&self) -> String {
        format!("http://{}:{}/api/v1/messages", self.host, self.http_port)
    }

    /// Mailpit REST endpoint for a single message by its Mailpit ID
    pub fn message_url(&self, id: &str) -> String {
        format!("http://{}:{}/api/v1/message/{}", self.host, self.http_port, id)
    }
}

// Container is automatically cleaned up when TestMailpit is dropped
impl Drop for TestMailpit {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test Mailpit container");
    }
}
