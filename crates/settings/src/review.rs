use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Settings for one review session: editor appearance plus the two
/// suspicious-line flags. Highlighting defaults to off and context collapsing
/// to on, matching the behavior reviewers see on first launch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewSettings {
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Line height as a percentage of the font size; kept integral so the
    /// whole bundle stays hashable.
    #[serde(default = "default_line_height_percent")]
    pub line_height_percent: u32,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_true")]
    pub line_numbers: bool,
    #[serde(default)]
    pub highlight_suspicious: bool,
    #[serde(default = "default_true")]
    pub hide_clean: bool,
}

fn default_font_size() -> u32 {
    16
}

fn default_line_height_percent() -> u32 {
    150
}

fn default_font_family() -> String {
    "monospace".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            line_height_percent: default_line_height_percent(),
            font_family: default_font_family(),
            line_numbers: true,
            highlight_suspicious: false,
            hide_clean: true,
        }
    }
}

impl ReviewSettings {
    pub fn sanitize(&mut self) {
        if self.font_size == 0 {
            self.font_size = default_font_size();
        }
        self.font_size = self.font_size.clamp(6, 72);
        if self.line_height_percent == 0 {
            self.line_height_percent = default_line_height_percent();
        }
        self.line_height_percent = self.line_height_percent.clamp(100, 300);
        if self.font_family.trim().is_empty() {
            self.font_family = default_font_family();
        }
    }

    /// Stable hash of the whole bundle. Two bundles with equal values always
    /// produce the same fingerprint, so rewriting settings without changing
    /// anything is observable as "no change".
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch_behavior() {
        let settings = ReviewSettings::default();
        assert!(!settings.highlight_suspicious);
        assert!(settings.hide_clean);
        assert!(settings.line_numbers);
        assert_eq!(settings.font_size, 16);
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let mut settings = ReviewSettings {
            font_size: 0,
            line_height_percent: 900,
            font_family: "   ".to_string(),
            ..ReviewSettings::default()
        };
        settings.sanitize();
        assert_eq!(settings.font_size, 16);
        assert_eq!(settings.line_height_percent, 300);
        assert_eq!(settings.font_family, "monospace");
    }

    #[test]
    fn fingerprint_is_stable_for_equal_bundles() {
        let a = ReviewSettings::default();
        let b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_changes_with_any_field() {
        let base = ReviewSettings::default();
        let mut highlighted = base.clone();
        highlighted.highlight_suspicious = true;
        assert_ne!(base.fingerprint(), highlighted.fingerprint());

        let mut resized = base.clone();
        resized.font_size = 18;
        assert_ne!(base.fingerprint(), resized.fingerprint());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: ReviewSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ReviewSettings::default());

        let settings: ReviewSettings =
            serde_json::from_str(r#"{"highlight_suspicious": true}"#).unwrap();
        assert!(settings.highlight_suspicious);
        assert!(settings.hide_clean);
    }
}
