//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the domain crates:
//! - `TestMailpit`: Mailpit SMTP capture container with automatic cleanup (feature: "mailpit")
//! - `TestDataBuilder`: Deterministic contact form data (always available)
//! - `RefusingRelay`, `closed_port`: In-process SMTP failure targets (always available)
//!
//! # Features
//!
//! - `mailpit`: Enables the Mailpit container helper
//! - `all`: Enables all container test infrastructure
//!
//! # Usage
//!
//! Add `features = ["mailpit"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mailpit"] }
//! ```
//!
//! Then in your tests:
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMailpit};
//!
//! #[tokio::test]
//! async fn my_smtp_test() {
//!     let mailpit = TestMailpit::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_smtp_test");
//!
//!     let name = builder.visitor_name();
//!     let email = builder.visitor_email();
//! }
//! ```

#[cfg(feature = "mailpit")]
mod mailpit;

#[cfg(feature = "mailpit")]
pub use mailpit::TestMailpit;

mod relay;

pub use relay::{RefusingRelay, closed_port};

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving every value from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_submit_contact");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Visitor display name, e.g. "Visitor 12345"
    pub fn visitor_name(&self) -> String {
        format!("Visitor {}", self.seed)
    }

    /// Visitor address on a reserved example domain
    pub fn visitor_email(&self) -> String {
        format!("visitor-{}@example.com", self.seed)
    }

    /// Multi-line message body mentioning `topic`
    pub fn message(&self, topic: &str) -> String {
        format!(
            "Question {} about {}.\nPlease get back to me.",
            self.seed, topic
        )
    }

    /// Operational mailbox used as SMTP_USER in tests
    pub fn mailbox(&self) -> String {
        format!("campus-{}@example.com", self.seed)
    }
}
