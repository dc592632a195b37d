//! # maxwindow-adapter-pushover
//!
//! Delivers notifications through the Pushover messages API.
//!
//! ## Dependency rule
//!
//! Depends on `maxwindow-app` (for the [`Notifier`] port) and
//! `maxwindow-domain`.

mod config;
mod error;

pub use config::PushoverConfig;
pub use error::PushoverError;

use reqwest::StatusCode;

use maxwindow_app::ports::{Delivery, Notifier};
use maxwindow_domain::error::MaxWindowError;

/// Blocking Pushover client.
pub struct Pushover {
    config: PushoverConfig,
    client: reqwest::blocking::Client,
}

impl Pushover {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`PushoverError::Client`] if the HTTP client cannot be built.
    pub fn new(config: PushoverConfig) -> Result<Self, PushoverError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(PushoverError::Client)?;
        Ok(Self { config, client })
    }

    /// Post `message` to the configured user.
    ///
    /// # Errors
    ///
    /// Returns [`PushoverError::Request`] on transport failure and
    /// [`PushoverError::Status`] on any status other than 200.
    pub fn push(&self, message: &str) -> Result<Delivery, PushoverError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .form(&[
                ("token", self.config.token.as_str()),
                ("user", self.config.user.as_str()),
                ("message", message),
            ])
            .send()
            .map_err(PushoverError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "pushover rejected notification");
            return Err(PushoverError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let delivery = Delivery {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        };
        tracing::debug!(
            status = delivery.status,
            reason = %delivery.reason,
            "notification delivered"
        );
        Ok(delivery)
    }
}

impl Notifier for Pushover {
    fn send(&self, message: &str) -> Result<Delivery, MaxWindowError> {
        self.push(message).map_err(PushoverError::into_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};

    fn client(server: &ServerGuard) -> Pushover {
        Pushover::new(PushoverConfig {
            user: "u123".to_string(),
            token: "a456".to_string(),
            api_url: format!("{}/1/messages.json", server.url()),
            ..PushoverConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn should_post_form_and_return_delivery() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/1/messages.json")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("token".into(), "a456".into()),
                Matcher::UrlEncoded("user".into(), "u123".into()),
                Matcher::UrlEncoded("message".into(), "Office was open".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"status":1,"request":"5042853c-402d-4a18-abcb-168734a801de"}"#)
            .create();

        let delivery = client(&server).send("Office was open").unwrap();

        assert_eq!(
            delivery,
            Delivery {
                status: 200,
                reason: "OK".to_string(),
            }
        );
        mock.assert();
    }

    #[test]
    fn should_reject_non_ok_status() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/1/messages.json")
            .with_status(400)
            .with_body(r#"{"user":"invalid","errors":["user identifier is invalid"],"status":0}"#)
            .create();

        let err = client(&server).push("hello").unwrap_err();

        match err {
            PushoverError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("user identifier is invalid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        mock.assert();
    }

    #[test]
    fn should_map_failures_to_domain_notify_error() {
        let mut server = Server::new();
        server
            .mock("POST", "/1/messages.json")
            .with_status(500)
            .create();

        let err = client(&server).send("hello").unwrap_err();

        assert!(matches!(err, MaxWindowError::Notify(_)));
    }

    #[test]
    fn should_report_unreachable_endpoint() {
        let config = PushoverConfig {
            user: "u123".to_string(),
            token: "a456".to_string(),
            api_url: "http://127.0.0.1:1/1/messages.json".to_string(),
            timeout_secs: 1,
        };
        let err = Pushover::new(config).unwrap().push("hello").unwrap_err();
        assert!(matches!(err, PushoverError::Request(_)));
    }
}
