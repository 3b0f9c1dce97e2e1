//! Construction options for a [`StatusBar`](crate::StatusBar).
//!
//! Options can be built in code with the `with_*` methods or read from TOML:
//!
//! ```toml
//! width = 80
//! height = 1
//! left_count = 1
//! background = "236"
//! tag_policy = "reject"
//!
//! [[right]]
//! width = 12
//! text = "11:45 AM"
//! tag = "clock"
//! foreground = "#ffaf00"
//! ```

use crate::error::ConfigError;
use crate::style::Color;
use crate::widget::Segment;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when a tag is registered while another segment holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagPolicy {
    /// Last writer wins: the previous holder loses the tag.
    #[default]
    Overwrite,
    /// The registration fails with [`BarError::DuplicateTag`](crate::BarError::DuplicateTag).
    Reject,
}

/// A segment declared in the options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentConfig {
    /// Display width in columns.
    pub width: u16,
    /// Initial text.
    pub text: String,
    /// Foreground color; the bar default when unset.
    pub foreground: Option<Color>,
    /// Background color; the bar default when unset.
    pub background: Option<Color>,
    /// Tag to register for lookup.
    pub tag: Option<String>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            width: Segment::DEFAULT_WIDTH,
            text: String::new(),
            foreground: None,
            background: None,
            tag: None,
        }
    }
}

/// Options for building a status bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BarOptions {
    /// Target render width in columns.
    pub width: u16,
    /// Target render height in rows.
    pub height: u16,
    /// Number of blank segments pre-allocated on the left.
    pub left_count: usize,
    /// Number of blank segments pre-allocated on the right.
    pub right_count: usize,
    /// Width of pre-allocated segments.
    pub segment_width: u16,
    /// Default segment foreground.
    pub foreground: Color,
    /// Default segment background.
    pub background: Color,
    /// Duplicate tag handling.
    pub tag_policy: TagPolicy,
    /// Segments appended to the left partition after the blanks.
    pub left: Vec<SegmentConfig>,
    /// Segments appended to the right partition after the blanks.
    pub right: Vec<SegmentConfig>,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            width: 100,
            height: 1,
            left_count: 0,
            right_count: 0,
            segment_width: Segment::DEFAULT_WIDTH,
            foreground: Color::SEGMENT_FG,
            background: Color::SEGMENT_BG,
            tag_policy: TagPolicy::Overwrite,
            left: Vec::new(),
            right: Vec::new(),
        }
    }
}

impl BarOptions {
    /// Set the target width.
    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Set the target height.
    #[must_use]
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Pre-allocate `n` blank segments on the left.
    #[must_use]
    pub fn with_left_len(mut self, n: usize) -> Self {
        self.left_count = n;
        self
    }

    /// Pre-allocate `n` blank segments on the right.
    #[must_use]
    pub fn with_right_len(mut self, n: usize) -> Self {
        self.right_count = n;
        self
    }

    /// Set the duplicate tag policy.
    #[must_use]
    pub fn with_tag_policy(mut self, policy: TagPolicy) -> Self {
        self.tag_policy = policy;
        self
    }

    /// Parse options from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, unknown keys,
    /// negative or out-of-range numbers, and invalid colors, and
    /// [`ConfigError::ZeroHeight`] for a zero height.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(raw)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// and the errors of [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Status bar options not found at '{}'; using defaults.",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Check the options describe a drawable bar.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroHeight`] if `height` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Rgb;

    #[test]
    fn test_defaults() {
        let options = BarOptions::default();
        assert_eq!(options.width, 100);
        assert_eq!(options.height, 1);
        assert_eq!(options.segment_width, 10);
        assert_eq!(options.foreground, Color::Indexed(252));
        assert_eq!(options.background, Color::Indexed(236));
        assert_eq!(options.tag_policy, TagPolicy::Overwrite);
    }

    #[test]
    fn test_builder() {
        let options = BarOptions::default()
            .with_width(30)
            .with_height(2)
            .with_left_len(1)
            .with_right_len(3)
            .with_tag_policy(TagPolicy::Reject);
        assert_eq!(options.width, 30);
        assert_eq!(options.height, 2);
        assert_eq!(options.left_count, 1);
        assert_eq!(options.right_count, 3);
        assert_eq!(options.tag_policy, TagPolicy::Reject);
    }

    #[test]
    fn test_parse_full_document() {
        let options = BarOptions::from_toml_str(
            r##"
            width = 80
            left_count = 2
            background = "#101010"
            tag_policy = "reject"

            [[right]]
            width = 12
            text = "11:45 AM"
            tag = "clock"
            foreground = "214"
            "##,
        )
        .unwrap();

        assert_eq!(options.width, 80);
        assert_eq!(options.height, 1);
        assert_eq!(options.left_count, 2);
        assert_eq!(options.background, Color::Rgb(Rgb::new(16, 16, 16)));
        assert_eq!(options.tag_policy, TagPolicy::Reject);
        assert_eq!(options.right.len(), 1);
        assert_eq!(options.right[0].width, 12);
        assert_eq!(options.right[0].tag.as_deref(), Some("clock"));
        assert_eq!(options.right[0].foreground, Some(Color::Indexed(214)));
        assert_eq!(options.right[0].background, None);
    }

    #[test]
    fn test_negative_width_rejected() {
        let err = BarOptions::from_toml_str("width = -5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_height_rejected() {
        let err = BarOptions::from_toml_str("height = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroHeight));
    }

    #[test]
    fn test_bad_color_rejected() {
        let err = BarOptions::from_toml_str(r#"foreground = "teal""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(BarOptions::from_toml_str("colour = 1").is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let options = BarOptions::default().with_width(42);
        let raw = toml::to_string(&options).unwrap();
        assert_eq!(BarOptions::from_toml_str(&raw).unwrap(), options);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let options = BarOptions::load("/nonexistent/segbar/options.toml").unwrap();
        assert_eq!(options, BarOptions::default());
    }
}
