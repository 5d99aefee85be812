//! Maps raw delivery errors onto the messages shown to visitors.

pub const CONNECTION_FAILED: &str =
    "Unable to connect to email server. Please check your internet connection and try again.";
pub const AUTHENTICATION_FAILED: &str =
    "Email authentication failed. Please check your SMTP credentials in the .env file.";
pub const TIMED_OUT: &str = "Email server connection timed out. Please try again later.";
pub const GENERIC_FAILURE: &str = "Failed to send email";

/// Picks the visitor-facing message for a delivery error.
///
/// Rules are checked in order and matched case-sensitively:
/// configuration text passes through, then connection, authentication and
/// timeout keywords map to fixed messages, and anything else passes through.
pub fn classify_failure(raw: &str) -> String {
    if raw.contains("SMTP configuration") {
        raw.to_string()
    } else if raw.contains("connection") || raw.contains("ECONNREFUSED") {
        CONNECTION_FAILED.to_string()
    } else if raw.contains("authentication") || raw.contains("Invalid login") {
        AUTHENTICATION_FAILED.to_string()
    } else if raw.contains("timeout") {
        TIMED_OUT.to_string()
    } else if raw.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message_passes_through() {
        let raw = "SMTP configuration is missing: SMTP_HOST. Please check your .env file.";
        assert_eq!(classify_failure(raw), raw);
    }

    #[test]
    fn test_connection_refused() {
        assert_eq!(classify_failure("connect ECONNREFUSED 127.0.0.1:587"), CONNECTION_FAILED);
        assert_eq!(
            classify_failure("SMTP connection failed: Connection refused (os error 111)"),
            CONNECTION_FAILED
        );
    }

    #[test]
    fn test_authentication() {
        assert_eq!(
            classify_failure("Invalid login: 535 5.7.8 Username and Password not accepted"),
            AUTHENTICATION_FAILED
        );
        assert_eq!(
            classify_failure("SMTP authentication failed: permanent error (535)"),
            AUTHENTICATION_FAILED
        );
    }

    #[test]
    fn test_timeout() {
        assert_eq!(classify_failure("Greeting timeout"), TIMED_OUT);
    }

    #[test]
    fn test_priority_connection_before_timeout() {
        assert_eq!(classify_failure("connection timeout"), CONNECTION_FAILED);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(classify_failure("Timeout"), "Timeout");
        assert_eq!(classify_failure("Connection reset"), "Connection reset");
    }

    #[test]
    fn test_other_messages_pass_through() {
        assert_eq!(
            classify_failure("550 mailbox unavailable"),
            "550 mailbox unavailable"
        );
    }

    #[test]
    fn test_empty_message_falls_back_to_generic() {
        assert_eq!(classify_failure(""), GENERIC_FAILURE);
    }
}
