use crate::{env_optional, ConfigError, FromEnv};

pub const SMTP_HOST: &str = "SMTP_HOST";
pub const SMTP_PORT: &str = "SMTP_PORT";
pub const SMTP_USER: &str = "SMTP_USER";
pub const SMTP_PASS: &str = "SMTP_PASS";

/// Raw SMTP relay settings as provided by the environment.
///
/// Values are kept unvalidated; the contact domain turns them into a
/// transport configuration and reports what is missing or malformed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SmtpEnv {
    pub host: Option<String>,
    pub port: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SmtpEnv {
    /// Names of the required variables that are absent, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (SMTP_HOST, &self.host),
            (SMTP_PORT, &self.port),
            (SMTP_USER, &self.username),
            (SMTP_PASS, &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

// Password stays out of logs.
impl std::fmt::Debug for SmtpEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpEnv")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl FromEnv for SmtpEnv {
    /// Never fails: absent values are reported later through [`SmtpEnv::missing`].
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_optional(SMTP_HOST),
            port: env_optional(SMTP_PORT),
            username: env_optional(SMTP_USER),
            password: env_optional(SMTP_PASS),
        })
    }
}
