//! Theme colors for the UI
//! Built-in palette follows the NicheLens brand; `[theme]` in the config file
//! can override individual colors with hex values.

use ratatui::style::Color;

use crate::config::ThemeConfig;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color, // Logo, active tab, primary button (pink)
    pub secondary: Color, // Secondary button (dark gray)
    pub success: Color, // Result panels
    pub warning: Color, // Status line
    pub text: Color, // Primary text
    pub text_dim: Color, // Hints, placeholder
    pub bg_selected: Color, // Active tab background
    pub inactive: Color, // Inactive borders
    pub header: Color, // Panel titles
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(236, 72, 153), // #ec4899
            secondary: Color::Rgb(31, 41, 55), // #1f2937
            success: Color::Rgb(34, 197, 94),
            warning: Color::Rgb(250, 179, 135),
            text: Color::Rgb(229, 231, 235),
            text_dim: Color::Rgb(156, 163, 175),
            bg_selected: Color::Rgb(55, 65, 81),
            inactive: Color::Rgb(75, 85, 99),
            header: Color::Rgb(244, 114, 182),
        }
    }
}

impl Theme {
    /// Build the theme from config overrides, rejecting malformed colors
    pub fn from_config(config: &ThemeConfig) -> Result<Self, ConfigError> {
        let mut theme = Self::default();

        let overrides: [(&'static str, &Option<String>, &mut Color); 4] = [
            ("accent", &config.accent, &mut theme.accent),
            ("secondary", &config.secondary, &mut theme.secondary),
            ("text", &config.text, &mut theme.text),
            ("text_dim", &config.text_dim, &mut theme.text_dim),
        ];

        for (field, value, slot) in overrides {
            if let Some(value) = value {
                *slot = Self::parse_hex_color(value).ok_or_else(|| ConfigError::InvalidColor {
                    field,
                    value: value.clone(),
                })?;
            }
        }

        Ok(theme)
    }

    /// Like `from_config`, falling back to defaults
    pub fn load(config: &ThemeConfig) -> Self {
        Self::from_config(config).unwrap_or_else(|e| {
            tracing::warn!("Using default theme: {}", e);
            Self::default()
        })
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
