//! # Output Configuration
//!
//! Settings for the generated lyric documents, read from an optional YAML file.
//!
//! ## Keys
//! ```yaml
//! font-path: static/fonts/leaguegothic/leaguegothic-regular-webfont.ttf
//! font-name: LeagueGothic
//! module-name: Lyrics        # Elm module name of the generated file
//! elm-layout: book           # book | flat
//! empty-groups: keep         # keep | drop
//! position-base: one         # one | zero
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use serde::Deserialize;

use crate::error::CueError;
use crate::lyrics::EmptyGroups;
use crate::position::PositionBase;

pub const DEFAULT_FONT_PATH: &str = "static/fonts/leaguegothic/leaguegothic-regular-webfont.ttf";
pub const DEFAULT_FONT_NAME: &str = "LeagueGothic";
pub const DEFAULT_MODULE_NAME: &str = "Lyrics";

/// Shape of the generated Elm lyric document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElmLayout {
    /// Nested `LyricBook` of pages of lines.
    #[default]
    Book,
    /// Flat `Array Lyric`, each lyric tagged with its break kind.
    Flat,
}

/// Validated output configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub font_path: String,
    pub font_name: String,
    pub module_name: String,
    pub elm_layout: ElmLayout,
    pub empty_groups: EmptyGroups,
    pub position_base: PositionBase,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            font_path: DEFAULT_FONT_PATH.to_string(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
            elm_layout: ElmLayout::default(),
            empty_groups: EmptyGroups::default(),
            position_base: PositionBase::default(),
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawOutputConfig {
    pub font_path: Option<String>,
    pub font_name: Option<String>,
    pub module_name: Option<String>,
    pub elm_layout: Option<ElmLayout>,
    pub empty_groups: Option<EmptyGroups>,
    pub position_base: Option<PositionBase>,
}

impl OutputConfig {
    /// Parse and validate YAML configuration. Empty input yields the defaults.
    ///
    /// # Example
    /// ```
    /// use cue_lyrics::config::{ElmLayout, OutputConfig};
    ///
    /// let config = OutputConfig::from_yaml("font-name: Oswald\nelm-layout: flat\n").unwrap();
    /// assert_eq!(config.font_name, "Oswald");
    /// assert_eq!(config.elm_layout, ElmLayout::Flat);
    /// assert_eq!(config.module_name, "Lyrics");
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, CueError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawOutputConfig =
            serde_yaml::from_str(content).map_err(|e| CueError::ConfigError(e.to_string()))?;

        let defaults = Self::default();
        let module_name = raw.module_name.unwrap_or(defaults.module_name);
        if !is_elm_module_name(&module_name) {
            return Err(CueError::ConfigError(format!(
                "Invalid Elm module name: {}",
                module_name
            )));
        }

        Ok(Self {
            font_path: raw.font_path.unwrap_or(defaults.font_path),
            font_name: raw.font_name.unwrap_or(defaults.font_name),
            module_name,
            elm_layout: raw.elm_layout.unwrap_or(defaults.elm_layout),
            empty_groups: raw.empty_groups.unwrap_or(defaults.empty_groups),
            position_base: raw.position_base.unwrap_or(defaults.position_base),
        })
    }
}

/// `Lyrics`, `Song.Lyrics`: dot-separated segments, each an uppercase-initial identifier.
fn is_elm_module_name(name: &str) -> bool {
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
