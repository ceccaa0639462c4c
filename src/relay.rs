use crate::config::RelayConfig;
use crate::error::RelayError;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Template parameters understood by the relay's email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub message: String,
    pub to_email: String,
}

impl TemplateParams {
    pub fn new(message: ContactMessage, to_email: &str) -> Self {
        Self {
            from_name: message.name,
            from_email: message.email,
            subject: message.subject,
            message: message.message,
            to_email: to_email.to_string(),
        }
    }
}

/// Hosted service that delivers the contact form as an email.
pub trait EmailRelay {
    fn send<'a>(&'a self, params: &'a TemplateParams) -> LocalBoxFuture<'a, Result<(), RelayError>>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// EmailJS REST client.
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    client: reqwest::Client,
    config: RelayConfig,
}

impl EmailJsRelay {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn check_configured(&self) -> Result<(), RelayError> {
        let required = [
            ("endpoint", &self.config.endpoint),
            ("service_id", &self.config.service_id),
            ("template_id", &self.config.template_id),
            ("public_key", &self.config.public_key),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(RelayError::NotConfigured(*name)),
            None => Ok(()),
        }
    }

    async fn post(&self, params: &TemplateParams) -> Result<(), RelayError> {
        self.check_configured()?;

        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: params,
        };

        debug!("Posting contact message to {}", self.config.endpoint);
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Relay rejected message ({}): {}", status, body);
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("Contact message accepted by relay ({})", status);
        Ok(())
    }
}

impl EmailRelay for EmailJsRelay {
    fn send<'a>(&'a self, params: &'a TemplateParams) -> LocalBoxFuture<'a, Result<(), RelayError>> {
        self.post(params).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Helper Functions ====================

    fn test_config(server_uri: &str) -> RelayConfig {
        RelayConfig {
            endpoint: format!("{}/api/v1.0/email/send", server_uri),
            service_id: "service_test".to_string(),
            template_id: "template_test".to_string(),
            public_key: "public_test".to_string(),
            to_email: "owner@example.com".to_string(),
        }
    }

    fn test_params() -> TemplateParams {
        TemplateParams::new(
            ContactMessage {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                subject: "Hello".to_string(),
                message: "Loved the portfolio".to_string(),
            },
            "owner@example.com",
        )
    }

    // ==================== TemplateParams Tests ====================

    #[test]
    fn test_template_params_maps_fields() {
        let params = test_params();
        assert_eq!(params.from_name, "Asha");
        assert_eq!(params.from_email, "asha@example.com");
        assert_eq!(params.to_email, "owner@example.com");
    }

    #[test]
    fn test_send_request_serialization() {
        let params = test_params();
        let request = SendRequest {
            service_id: "s",
            template_id: "t",
            user_id: "u",
            template_params: &params,
        };

        let json = serde_json::to_value(&request).expect("Should serialize");
        assert_eq!(json["service_id"], "s");
        assert_eq!(json["user_id"], "u");
        assert_eq!(json["template_params"]["from_name"], "Asha");
        assert_eq!(json["template_params"]["message"], "Loved the portfolio");
    }

    // ==================== EmailJsRelay Tests ====================

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/email/send"))
            .and(body_json(serde_json::json!({
                "service_id": "service_test",
                "template_id": "template_test",
                "user_id": "public_test",
                "template_params": {
                    "from_name": "Asha",
                    "from_email": "asha@example.com",
                    "subject": "Hello",
                    "message": "Loved the portfolio",
                    "to_email": "owner@example.com"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
            .expect(1)
            .mount(&server)
            .await;

        let relay = EmailJsRelay::new(test_config(&server.uri()));
        relay.send(&test_params()).await.expect("Should succeed");
    }

    #[tokio::test]
    async fn test_send_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1.0/email/send"))
            .respond_with(ResponseTemplate::new(400).set_body_string("The Public Key is invalid"))
            .mount(&server)
            .await;

        let relay = EmailJsRelay::new(test_config(&server.uri()));
        let err = relay.send(&test_params()).await.unwrap_err();

        match err {
            RelayError::Rejected { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Public Key"));
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_unconfigured_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = test_config(&server.uri());
        config.template_id = String::new();
        let relay = EmailJsRelay::new(config);
        let err = relay.send(&test_params()).await.unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured("template_id")));
    }

    #[tokio::test]
    async fn test_send_transport_failure() {
        // Nothing listens on this port
        let relay = EmailJsRelay::new(test_config("http://127.0.0.1:9"));
        let err = relay.send(&test_params()).await.unwrap_err();
        assert!(matches!(err, RelayError::Transport(_)));
    }
}
