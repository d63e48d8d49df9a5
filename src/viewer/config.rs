// src/viewer/config.rs
use crate::error::ViewerError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;
pub const IDLE_HIDE_DELAY_MS: u32 = 2000;
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;
pub const IMAGE_CACHE_CAPACITY: usize = 20;
pub const CLOSE_SETTLE_DELAY_MS: u32 = 100;

/// Tunables shared by the live viewer and the exported script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    pub default_aspect_ratio: f64,
    pub idle_hide_delay_ms: u32,
    pub swipe_threshold_px: f64,
    pub image_cache_capacity: usize,
    pub close_settle_delay_ms: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_aspect_ratio: DEFAULT_ASPECT_RATIO,
            idle_hide_delay_ms: IDLE_HIDE_DELAY_MS,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
            image_cache_capacity: IMAGE_CACHE_CAPACITY,
            close_settle_delay_ms: CLOSE_SETTLE_DELAY_MS,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ViewerError> {
        if !(self.default_aspect_ratio.is_finite() && self.default_aspect_ratio > 0.0) {
            return Err(ViewerError::InvalidAspectRatio(self.default_aspect_ratio));
        }
        if self.image_cache_capacity == 0 {
            return Err(ViewerError::ZeroCacheCapacity);
        }
        if !(self.swipe_threshold_px.is_finite() && self.swipe_threshold_px >= 0.0) {
            return Err(ViewerError::InvalidSwipeThreshold(self.swipe_threshold_px));
        }
        Ok(())
    }
}

#[cfg(test)]
impl ViewerConfig {
    pub fn with_default_aspect_ratio(mut self, ratio: f64) -> Self {
        self.default_aspect_ratio = ratio;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.idle_hide_delay_ms, 2000);
        assert_eq!(config.swipe_threshold_px, 50.0);
        assert_eq!(config.image_cache_capacity, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{ "defaultAspectRatio": 1.5 }"#).unwrap();
        assert_eq!(config.default_aspect_ratio, 1.5);
        assert_eq!(config.idle_hide_delay_ms, IDLE_HIDE_DELAY_MS);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ViewerConfig::default().with_default_aspect_ratio(0.0);
        assert_eq!(config.validate(), Err(ViewerError::InvalidAspectRatio(0.0)));

        let config = ViewerConfig {
            image_cache_capacity: 0,
            ..ViewerConfig::default()
        };
        assert_eq!(config.validate(), Err(ViewerError::ZeroCacheCapacity));
    }
}
