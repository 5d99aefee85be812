//! Resolution of raw SMTP settings into a transport configuration.

use crate::error::{ContactError, ContactResult};
use core_config::smtp::SmtpEnv;
use std::time::Duration;

/// Port on which the relay expects TLS from the first byte.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// Connect, greeting and read timeout applied to every relay session.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Validated settings for one SMTP relay.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// TLS on connect (port 465) instead of a STARTTLS upgrade.
    pub implicit_tls: bool,
    /// Relays with self-signed or mismatched certificates are accepted.
    pub accept_invalid_certs: bool,
    pub connect_timeout: Duration,
    pub greeting_timeout: Duration,
    pub read_timeout: Duration,
}

impl TransportConfig {
    /// Validates `env`, reporting every missing variable at once before
    /// looking at the port.
    pub fn resolve(env: &SmtpEnv) -> ContactResult<Self> {
        let (Some(host), Some(port), Some(username), Some(password)) =
            (&env.host, &env.port, &env.username, &env.password)
        else {
            return Err(ContactError::MissingConfig(env.missing()));
        };

        let port = parse_port(port)?;

        Ok(Self {
            host: host.clone(),
            port,
            username: username.clone(),
            password: password.clone(),
            implicit_tls: port == IMPLICIT_TLS_PORT,
            accept_invalid_certs: true,
            connect_timeout: DEFAULT_TIMEOUT,
            greeting_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// The operational mailbox: sender and recipient of every contact email.
    pub fn mailbox(&self) -> &str {
        &self.username
    }

    /// Longest of the three timeouts; lettre applies one value to the whole session.
    pub fn session_timeout(&self) -> Duration {
        self.connect_timeout
            .max(self.greeting_timeout)
            .max(self.read_timeout)
    }
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("implicit_tls", &self.implicit_tls)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("connect_timeout", &self.connect_timeout)
            .field("greeting_timeout", &self.greeting_timeout)
            .field("read_timeout", &self.read_timeout)
            .finish()
    }
}

fn parse_port(raw: &str) -> ContactResult<u16> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|port| (1..=65_535).contains(port))
        .and_then(|port| u16::try_from(port).ok())
        .ok_or_else(|| ContactError::InvalidPort(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::smtp::{SMTP_HOST, SMTP_PASS, SMTP_USER};

    fn env_with_port(port: &str) -> SmtpEnv {
        SmtpEnv {
            host: Some("smtp.example.com".to_string()),
            port: Some(port.to_string()),
            username: Some("campus@example.com".to_string()),
            password: Some("secret".to_string()),
        }
    }

    #[test]
    fn test_port_465_uses_implicit_tls() {
        let config = TransportConfig::resolve(&env_with_port("465")).unwrap();
        assert_eq!(config.port, 465);
        assert!(config.implicit_tls);
    }

    #[test]
    fn test_port_587_uses_starttls() {
        let config = TransportConfig::resolve(&env_with_port("587")).unwrap();
        assert_eq!(config.port, 587);
        assert!(!config.implicit_tls);
    }

    #[test]
    fn test_fixed_transport_policy() {
        let config = TransportConfig::resolve(&env_with_port("587")).unwrap();
        assert!(config.accept_invalid_certs);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.greeting_timeout, Duration::from_secs(10));
        assert_eq!(config.read_timeout, Duration::from_secs(10));
        assert_eq!(config.session_timeout(), Duration::from_secs(10));
        assert_eq!(config.mailbox(), "campus@example.com");
    }

    #[test]
    fn test_invalid_ports_are_rejected() {
        for port in ["abc", "70000", "0", "-25", "", "587abc"] {
            let err = TransportConfig::resolve(&env_with_port(port)).unwrap_err();
            assert_eq!(err, ContactError::InvalidPort(port.to_string()));
            assert!(err.to_string().contains("Invalid SMTP_PORT"));
        }
    }

    #[test]
    fn test_port_bounds_are_inclusive() {
        assert_eq!(TransportConfig::resolve(&env_with_port("1")).unwrap().port, 1);
        assert_eq!(
            TransportConfig::resolve(&env_with_port("65535")).unwrap().port,
            65535
        );
    }

    #[test]
    fn test_missing_values_are_all_reported() {
        let env = SmtpEnv {
            host: None,
            port: Some("587".to_string()),
            username: Some("campus@example.com".to_string()),
            password: None,
        };

        let err = TransportConfig::resolve(&env).unwrap_err();
        assert_eq!(err, ContactError::MissingConfig(vec![SMTP_HOST, SMTP_PASS]));
    }

    #[test]
    fn test_missing_config_reported_before_bad_port() {
        let env = SmtpEnv {
            port: Some("abc".to_string()),
            ..Default::default()
        };

        let err = TransportConfig::resolve(&env).unwrap_err();
        assert_eq!(
            err,
            ContactError::MissingConfig(vec![SMTP_HOST, SMTP_USER, SMTP_PASS])
        );
    }

    #[test]
    fn test_debug_hides_password() {
        let config = TransportConfig::resolve(&env_with_port("587")).unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
