//! In-process SMTP relays for failure-path tests
//!
//! `RefusingRelay` speaks just enough SMTP to reach the login step and then
//! rejects every credential with a 535 reply. `closed_port` hands out a local
//! port with nothing listening on it.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const GREETING: &[u8] = b"220 relay.test ESMTP ready\r\n";
const EHLO_REPLY: &[u8] = b"250-relay.test\r\n250 AUTH PLAIN LOGIN\r\n";
const AUTH_REFUSED: &[u8] = b"535 5.7.8 Authentication credentials invalid\r\n";
const CLOSING: &[u8] = b"221 2.0.0 Bye\r\n";

/// Local relay that refuses every login
///
/// Accepts any number of sessions until dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::RefusingRelay;
///
/// # async fn example() {
/// let relay = RefusingRelay::start().await;
/// let address = format!("{}:{}", relay.host(), relay.port());
/// # }
/// ```
pub struct RefusingRelay {
    port: u16,
    task: JoinHandle<()>,
}

impl RefusingRelay {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind refusing relay");
        let port = listener
            .local_addr()
            .expect("Failed to read relay address")
            .port();

        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve_session(stream));
            }
        });

        tracing::info!(port, "Refusing SMTP relay started");

        Self { port, task }
    }

    pub fn host(&self) -> &str {
        "127.0.0.1"
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Drop for RefusingRelay {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve_session(stream: TcpStream) {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();

    if write.write_all(GREETING).await.is_err() {
        return;
    }

    while let Ok(Some(line)) = lines.next_line().await {
        let command = line.to_ascii_uppercase();
        let reply = if command.starts_with("EHLO") || command.starts_with("HELO") {
            EHLO_REPLY
        } else if command.starts_with("AUTH") {
            AUTH_REFUSED
        } else {
            CLOSING
        };

        if write.write_all(reply).await.is_err() || reply == CLOSING {
            return;
        }
    }
}

/// A loopback port with no listener behind it
pub fn closed_port() -> u16 {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    listener
        .local_addr()
        .expect("Failed to read ephemeral port")
        .port()
}
