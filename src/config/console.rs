//! Console screen configuration.

use serde::Deserialize;

/// Settings shared by the management screens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Records per table page
    pub page_size: usize,
    /// Base URL the dispatch step derives installation form links from
    pub form_link_base: String,
    /// Filename prefix for CSV exports
    pub export_prefix: String,
    /// Optional JSON snapshot file the demo binary seeds the store from
    pub snapshot_path: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            form_link_base: "https://forms.salesdesk.example/install".to_string(),
            export_prefix: "salesdesk".to_string(),
            snapshot_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_for_omitted_fields() {
        let config: ConsoleConfig = toml::from_str("page_size = 20").unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.export_prefix, "salesdesk");
        assert!(config.snapshot_path.is_none());
    }
}
