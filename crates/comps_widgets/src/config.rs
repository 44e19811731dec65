//! TOML configuration for both widgets
//!
//! ```toml
//! [button]
//! label = "Submit"
//! animation = { kind = "bounce", count = 4 }
//!
//! [timer]
//! mode = "count_down"
//! start_epoch_seconds = 90
//! animation = "slide_bottom"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::button::ButtonConfig;
use crate::error::{CompsError, Result};
use crate::timer::TimerConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompsConfig {
    pub button: ButtonConfig,
    pub timer: TimerConfig,
}

impl CompsConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CompsConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), "loaded widget config");
        Ok(config)
    }

    /// Reject values the widgets cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.button.animation.style().count == 0 {
            return Err(CompsError::InvalidConfig(
                "button.animation.count must be at least 1".to_string(),
            ));
        }
        if self.button.step_ms == 0 && self.button.countdown_steps > 0 {
            return Err(CompsError::InvalidConfig(
                "button.step_ms must be positive".to_string(),
            ));
        }
        if self.timer.separator.chars().any(|c| c.is_ascii_digit()) {
            return Err(CompsError::InvalidConfig(
                "timer.separator must not contain digits".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::AnimationKind;
    use crate::timer::{TimeAnimationKind, TimeMode};
    use comps_core::Color;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CompsConfig::from_toml_str("").unwrap();
        assert_eq!(config, CompsConfig::default());
        assert_eq!(config.timer.separator, " : ");
        assert_eq!(config.button.indicator_spacing, 5.0);
    }

    #[test]
    fn test_parse_full_config() {
        let config = CompsConfig::from_toml_str(
            r##"
            [button]
            label = "Pay"
            text_color = "#FF0000"
            enabled = false
            animation = { kind = "fade", count = 5 }
            background = { type = "solid", color = "#00000080" }

            [timer]
            mode = "count_down"
            animation = "bounce_bottom"
            start_epoch_seconds = 90
            icon = "alarm"
            "##,
        )
        .unwrap();

        assert_eq!(config.button.label, "Pay");
        assert_eq!(config.button.text_color, Color::from_rgba8(255, 0, 0, 255));
        assert!(!config.button.enabled);
        assert!(matches!(config.button.animation, AnimationKind::Fade(_)));
        assert_eq!(config.button.animation.style().count, 5);
        assert_eq!(config.button.animation.duration_ms(), 600);
        assert_eq!(config.timer.mode, TimeMode::CountDown);
        assert_eq!(config.timer.animation, TimeAnimationKind::BounceBottom);
        assert_eq!(config.timer.start_epoch_seconds, 90);
        assert_eq!(config.timer.icon.as_deref(), Some("alarm"));
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = CompsConfig::from_toml_str("[button]\nanimation = { kind = \"bounce\", count = 0 }")
            .unwrap_err();
        assert!(matches!(err, CompsError::ConfigParse(_)));
    }

    #[test]
    fn test_validate_separator() {
        let mut config = CompsConfig::default();
        config.timer.separator = "1".to_string();
        assert!(matches!(config.validate(), Err(CompsError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let err = CompsConfig::from_toml_str("[timer]\nmode = \"sideways\"").unwrap_err();
        assert!(matches!(err, CompsError::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CompsConfig::load("/nonexistent/comps.toml").unwrap_err();
        assert!(matches!(err, CompsError::Io(_)));
    }
}
