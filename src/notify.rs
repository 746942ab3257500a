//! SMS notification side-channel.
//!
//! The gateway is a plain HTTP GET with a URL-encoded message and recipient;
//! it reports success through a marker substring in the response body rather
//! than any structured status contract. Delivery is fire-and-forget: a
//! partial failure is reported as a ratio, never as a hard error, and a
//! total failure is logged and swallowed.

use crate::config::GatewayConfig;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info, warn};

/// Transport used to reach the SMS gateway. Production wraps a
/// [`reqwest::Client`]; tests substitute a scripted fake.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// Issues a GET and returns the raw response body.
    async fn fetch(&self, url: Url) -> Result<String>;
}

/// Production transport over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsTransport for HttpTransport {
    async fn fetch(&self, url: Url) -> Result<String> {
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }
}

/// Outcome of one bulk delivery attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryOutcome {
    /// Recipients whose response body carried the success marker
    pub delivered: usize,
    /// Recipients whose request failed or came back without the marker
    pub failed: usize,
}

impl DeliveryOutcome {
    /// Recipients attempted.
    #[must_use]
    pub const fn total(self) -> usize {
        self.delivered + self.failed
    }

    /// True when some but not all recipients were reached.
    #[must_use]
    pub const fn is_partial(self) -> bool {
        self.failed > 0 && self.delivered > 0
    }

    /// The partial-failure ratio as an error, for callers that surface it.
    #[must_use]
    pub fn as_partial_error(self) -> Option<Error> {
        self.is_partial().then_some(Error::PartialNotification {
            delivered: self.delivered,
            total: self.total(),
        })
    }
}

/// SMS gateway client bound to one configuration.
pub struct SmsGateway<T> {
    transport: T,
    config: GatewayConfig,
}

impl<T: SmsTransport> SmsGateway<T> {
    /// Gateway over a transport and configuration.
    pub fn new(transport: T, config: GatewayConfig) -> Self {
        Self { transport, config }
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the URL-encoded request for one recipient.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the configured base URL is malformed.
    pub fn message_url(&self, recipient: &str, message: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("apikey", self.config.api_key.as_str()),
                ("sender", self.config.sender_id.as_str()),
                ("numbers", recipient),
                ("message", message),
            ],
        )
        .map_err(|e| Error::Config {
            message: format!("invalid gateway base URL: {e}"),
        })
    }

    /// Sends one message to every recipient, counting successes by marker
    /// inspection of each response body. Never returns an error: transport
    /// failures and missing markers both count as failed deliveries.
    pub async fn send_bulk(&self, recipients: &[String], message: &str) -> DeliveryOutcome {
        if !self.config.enabled {
            debug!("SMS gateway disabled, skipping {} recipient(s)", recipients.len());
            return DeliveryOutcome::default();
        }

        let mut outcome = DeliveryOutcome::default();
        for recipient in recipients {
            let delivered = match self.message_url(recipient, message) {
                Ok(url) => match self.transport.fetch(url).await {
                    Ok(body) => body.contains(&self.config.success_marker),
                    Err(e) => {
                        warn!("SMS to {} failed: {}", recipient, e);
                        false
                    }
                },
                Err(e) => {
                    warn!("SMS to {} not attempted: {}", recipient, e);
                    false
                }
            };
            if delivered {
                outcome.delivered += 1;
            } else {
                outcome.failed += 1;
            }
        }
        info!(
            "SMS delivery: {} of {} recipient(s)",
            outcome.delivered,
            outcome.total()
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedTransport;

    fn config() -> GatewayConfig {
        GatewayConfig {
            enabled: true,
            base_url: "https://sms.example.com/send".to_string(),
            api_key: "k123".to_string(),
            sender_id: "SALESD".to_string(),
            success_marker: "SMS-SHOOT".to_string(),
        }
    }

    #[test]
    fn test_message_url_is_url_encoded() {
        let gateway = SmsGateway::new(ScriptedTransport::default(), config());
        let url = gateway
            .message_url("9876543210", "Order confirmed: 5 Sep & on time")
            .unwrap();
        let text = url.as_str();
        assert!(text.starts_with("https://sms.example.com/send?"));
        assert!(text.contains("numbers=9876543210"));
        // Space and ampersand are percent-encoded in the query.
        assert!(text.contains("message=Order+confirmed%3A+5+Sep+%26+on+time"));
    }

    #[tokio::test]
    async fn test_partial_failure_is_a_ratio_not_an_error() {
        let transport = ScriptedTransport::with_bodies(vec![
            Ok("status: SMS-SHOOT ok".to_string()),
            Ok("error: credit exhausted".to_string()),
            Err("connect timeout".to_string()),
        ]);
        let gateway = SmsGateway::new(transport, config());

        let outcome = gateway
            .send_bulk(
                &["1".to_string(), "2".to_string(), "3".to_string()],
                "hello",
            )
            .await;
        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.failed, 2);
        assert!(outcome.is_partial());
        let err = outcome.as_partial_error().unwrap();
        assert_eq!(
            err.to_string(),
            "notification delivered to 1 of 3 recipients"
        );
    }

    #[tokio::test]
    async fn test_disabled_gateway_sends_nothing() {
        let mut cfg = config();
        cfg.enabled = false;
        let gateway = SmsGateway::new(ScriptedTransport::default(), cfg);
        let outcome = gateway.send_bulk(&["1".to_string()], "hello").await;
        assert_eq!(outcome.total(), 0);
    }

    #[tokio::test]
    async fn test_success_judged_by_marker_substring() {
        let transport =
            ScriptedTransport::with_bodies(vec![Ok("prefix SMS-SHOOT suffix".to_string())]);
        let gateway = SmsGateway::new(transport, config());
        let outcome = gateway.send_bulk(&["1".to_string()], "hi").await;
        assert_eq!(outcome.delivered, 1);
        assert!(!outcome.is_partial());
        assert!(outcome.as_partial_error().is_none());
    }
}
