//! Highlight pipeline configuration.

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::transform::TransformerChain;

/// Theme names for the two display modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePair {
    pub light: String,
    pub dark: String,
}

impl ThemePair {
    pub fn new(light: impl Into<String>, dark: impl Into<String>) -> Self {
        Self {
            light: light.into(),
            dark: dark.into(),
        }
    }
}

/// Every language recognized for highlighting, derived from the grammar
/// catalog. Never manually curated.
pub type LanguageSet = BTreeSet<String>;

/// Errors raised while building the highlight configuration.
///
/// All of these are fatal to the site build; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown theme \"{name}\": not present in the theme catalog")]
    UnknownTheme { name: String },

    #[error("failed to load themes from {dir}")]
    ThemeDir {
        dir: String,
        #[source]
        source: syntect::LoadingError,
    },
}

/// The assembled highlighting configuration.
///
/// Built once at configuration time and immutable thereafter; rendering
/// workers share it by reference.
#[derive(Debug)]
pub struct HighlightConfig {
    /// Light/dark theme pair, validated against the catalog.
    pub themes: ThemePair,

    /// Full language catalog of the engine at build time.
    pub languages: LanguageSet,

    /// Fixed-order transformer chain applied to every code block.
    pub transformers: TransformerChain,
}

impl HighlightConfig {
    /// Assemble the configuration.
    ///
    /// Fails fast with [`ConfigError::UnknownTheme`] if either theme name is
    /// missing from the catalog; no partial configuration is produced.
    pub fn build(themes: ThemePair, catalog: &Catalog) -> Result<Self, ConfigError> {
        catalog.require_theme(&themes.light)?;
        catalog.require_theme(&themes.dark)?;

        let languages: LanguageSet = catalog.language_names().map(str::to_owned).collect();

        tracing::debug!(
            "built highlight config: light={}, dark={}, {} languages",
            themes.light,
            themes.dark,
            languages.len()
        );

        Ok(Self {
            themes,
            languages,
            transformers: TransformerChain::default_chain(),
        })
    }
}
