use thiserror::Error;

/// Failure of the hosted email relay.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("relay is not configured: missing {0}")]
    NotConfigured(&'static str),
}

/// Why a submit press did not reach the relay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<&'static str>),

    #[error("a message is already being sent")]
    InFlight,

    #[error("no contact form on this page")]
    NoForm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_includes_status_and_body() {
        let err = RelayError::Rejected {
            status: 400,
            body: "The Public Key is invalid".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("Public Key"));
    }

    #[test]
    fn test_not_configured_names_field() {
        let err = RelayError::NotConfigured("service_id");
        assert_eq!(err.to_string(), "relay is not configured: missing service_id");
    }

    #[test]
    fn test_invalid_display_counts_fields() {
        let err = SubmitBlocked::Invalid(vec!["email", "message"]);
        assert_eq!(err.to_string(), "2 field(s) failed validation");
    }
}
