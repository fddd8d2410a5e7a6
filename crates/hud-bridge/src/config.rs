use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use telemetry_sink::OutboundMessage;

use crate::MessageKind;

/// Output stream names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicConfig {
    pub vfr_hud: String,
    pub wind_estimation: String,
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            vfr_hud: "vfr_hud".to_string(),
            wind_estimation: "wind_estimation".to_string(),
        }
    }
}

impl TopicConfig {
    /// Stream a translated message is published on.
    pub fn topic_for(&self, message: &OutboundMessage) -> &str {
        match message {
            OutboundMessage::VfrHud(_) => &self.vfr_hud,
            OutboundMessage::WindEstimate(_) => &self.wind_estimation,
        }
    }

    /// Stream the translation of an input kind ends up on.
    pub fn topic_for_kind(&self, kind: MessageKind) -> &str {
        match kind {
            MessageKind::VfrHud => &self.vfr_hud,
            MessageKind::Wind => &self.wind_estimation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub topics: TopicConfig,
    /// Publisher queue depth for channel-backed sinks
    pub queue_size: usize,
    /// Reject malformed messages instead of passing values through
    pub validate_inputs: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            topics: TopicConfig::default(),
            queue_size: 10,
            validate_inputs: false,
        }
    }
}

pub fn parse_config(raw: &str) -> anyhow::Result<BridgeConfig> {
    // An empty document deserializes as null, which serde_yaml rejects for a struct.
    if raw.trim().is_empty() {
        return Ok(BridgeConfig::default());
    }
    let cfg: BridgeConfig = serde_yaml::from_str(raw).context("decoding bridge config")?;
    Ok(cfg)
}

pub fn load_config_file(path: impl AsRef<Path>) -> anyhow::Result<BridgeConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading bridge config: {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("parsing yaml: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.topics.vfr_hud, "vfr_hud");
        assert_eq!(cfg.topics.wind_estimation, "wind_estimation");
        assert_eq!(cfg.queue_size, 10);
        assert!(!cfg.validate_inputs);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = parse_config("topics:\n  wind_estimation: wind\nvalidate_inputs: true\n").unwrap();
        assert_eq!(cfg.topics.vfr_hud, "vfr_hud");
        assert_eq!(cfg.topics.wind_estimation, "wind");
        assert_eq!(cfg.queue_size, 10);
        assert!(cfg.validate_inputs);
    }

    #[test]
    fn test_topic_for_kind() {
        let topics = TopicConfig::default();
        assert_eq!(topics.topic_for_kind(MessageKind::VfrHud), "vfr_hud");
        assert_eq!(topics.topic_for_kind(MessageKind::Wind), "wind_estimation");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse_config("  \n").unwrap(), BridgeConfig::default());
    }

    #[test]
    fn test_bad_type_is_an_error() {
        assert!(parse_config("queue_size: many\n").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config_file("/nonexistent/bridge.yaml").unwrap_err();
        assert!(format!("{err:#}").contains("reading bridge config"));
    }
}
