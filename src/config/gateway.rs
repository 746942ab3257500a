//! SMS gateway configuration.

use serde::Deserialize;

/// Settings for the third-party SMS gateway.
///
/// The API key is usually supplied through the `SMS_API_KEY` environment
/// variable rather than the config file; see
/// [`crate::config::load_app_configuration`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Master switch; when false, `send_bulk` is a no-op
    pub enabled: bool,
    /// Gateway endpoint the GET request is built on
    pub base_url: String,
    /// Account API key
    pub api_key: String,
    /// Registered sender id
    pub sender_id: String,
    /// Substring of the response body that signals success
    pub success_marker: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://sms.example.com/send".to_string(),
            api_key: String::new(),
            sender_id: "SALESD".to_string(),
            success_marker: "SMS-SHOOT".to_string(),
        }
    }
}
