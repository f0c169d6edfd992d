//! Editor configuration.
//!
//! [`EditorConfig`] is a plain value owned by each [`crate::EditorCore`]. Hosts build one up
//! front (or take the defaults) and adjust it at runtime through
//! [`crate::Action::View`] actions.

use textedit_lang::LanguageConfig;

/// Controls what one indentation level (Tab key, indent command, smart newline) inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabKeyBehavior {
    /// Insert a literal tab character (`'\t'`).
    Tab,
    /// Insert spaces up to the next tab stop (based on `tab_width`).
    #[default]
    Spaces,
}

/// Zoom limits for the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomConfig {
    /// Smallest zoom level, in percent.
    pub min_percent: u16,
    /// Largest zoom level, in percent.
    pub max_percent: u16,
    /// Increment applied by zoom in / zoom out.
    pub step_percent: u16,
    /// Level restored by zoom reset.
    pub default_percent: u16,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_percent: 50,
            max_percent: 400,
            step_percent: 10,
            default_percent: 100,
        }
    }
}

impl ZoomConfig {
    pub(crate) fn clamp(&self, percent: i32) -> u16 {
        let clamped = percent.clamp(i32::from(self.min_percent), i32::from(self.max_percent));
        u16::try_from(clamped).unwrap_or(self.default_percent)
    }
}

/// Per-document editing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Tab width in character cells (always at least 1).
    pub tab_width: usize,
    /// What one indentation level inserts.
    pub tab_key_behavior: TabKeyBehavior,
    /// Auto-insert closing delimiters when typing an opener.
    pub auto_pair: bool,
    /// Delimiter pairs and block syntax.
    pub language: LanguageConfig,
    /// Zoom limits.
    pub zoom: ZoomConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            tab_key_behavior: TabKeyBehavior::Spaces,
            auto_pair: true,
            language: LanguageConfig::default(),
            zoom: ZoomConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Text of one indentation level.
    pub fn indent_unit(&self) -> String {
        match self.tab_key_behavior {
            TabKeyBehavior::Tab => "\t".to_string(),
            TabKeyBehavior::Spaces => " ".repeat(self.tab_width.max(1)),
        }
    }

    /// Text inserted by the Tab key at visual cell offset `x`: a tab, or spaces to the next stop.
    pub fn tab_text_at(&self, x: usize) -> String {
        match self.tab_key_behavior {
            TabKeyBehavior::Tab => "\t".to_string(),
            TabKeyBehavior::Spaces => {
                let tab_width = self.tab_width.max(1);
                " ".repeat(tab_width - x % tab_width)
            }
        }
    }
}
