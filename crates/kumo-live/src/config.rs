//! Pipeline configuration.

use kumo_indicator::IchimokuParams;
use kumo_types::{Interval, KumoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a [`LivePipeline`](crate::LivePipeline).
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```json
/// { "interval": "m5", "params": { "displacement": 30 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    /// Bar length.
    pub interval: Interval,
    /// Indicator windows and displacement.
    pub params: IchimokuParams,
    /// Period of the redraw timer, in milliseconds.
    pub redraw_interval_ms: u64,
}

impl LiveConfig {
    /// Default redraw period (one second).
    pub const DEFAULT_REDRAW_INTERVAL_MS: u64 = 1_000;

    /// Returns the redraw period.
    #[must_use]
    pub const fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }

    /// Checks the indicator windows and the redraw period.
    ///
    /// # Errors
    ///
    /// Returns [`KumoError::Config`] if the parameters are out of bounds or the
    /// redraw period is zero.
    pub fn validate(&self) -> Result<()> {
        self.params
            .validate()
            .map_err(|e| KumoError::Config(e.to_string()))?;

        if self.redraw_interval_ms == 0 {
            return Err(KumoError::Config(
                "redraw interval must be > 0 ms".to_string(),
            ));
        }

        Ok(())
    }

    /// Loads and validates a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`validate`](Self::validate).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            interval: Interval::default(),
            params: IchimokuParams::default(),
            redraw_interval_ms: Self::DEFAULT_REDRAW_INTERVAL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = LiveConfig::default();
        assert_eq!(config.interval, Interval::Minute1);
        assert_eq!(config.params, IchimokuParams::new(9, 26, 52, 26));
        assert_eq!(config.redraw_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"interval": "m5", "params": {{"displacement": 30}}, "redraw_interval_ms": 250}}"#
        )
        .unwrap();

        let config = LiveConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.interval, Interval::Minute5);
        assert_eq!(config.params.displacement, 30);
        assert_eq!(config.params.base_window, 26);
        assert_eq!(config.redraw_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_rejects_zero_window() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"params": {{"span_b_window": 0}}}}"#).unwrap();

        let err = LiveConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, KumoError::Config(_)));
    }

    #[test]
    fn test_load_rejects_huge_displacement() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"params": {{"displacement": {}}}}}"#, usize::MAX).unwrap();

        let err = LiveConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, KumoError::Config(_)));
        assert!(err.to_string().contains("displacement"));
    }

    #[test]
    fn test_load_rejects_unknown_interval() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"interval": "m7"}}"#).unwrap();

        let err = LiveConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, KumoError::Json(_)));
    }

    #[test]
    fn test_zero_redraw_interval() {
        let config = LiveConfig {
            redraw_interval_ms: 0,
            ..LiveConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
