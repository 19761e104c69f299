//! Theme and grammar catalogs of the highlighting engine.

use std::path::Path;

use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::config::ConfigError;

/// The engine's theme and grammar catalogs, loaded once at configuration time.
pub struct Catalog {
    themes: ThemeSet,
    syntaxes: SyntaxSet,
}

impl Catalog {
    /// Load the catalogs bundled with the engine.
    pub fn bundled() -> Self {
        let themes = ThemeSet::load_defaults();
        let syntaxes = SyntaxSet::load_defaults_newlines();

        tracing::debug!(
            "loaded bundled catalogs: {} themes, {} grammars",
            themes.themes.len(),
            syntaxes.syntaxes().len()
        );

        Self { themes, syntaxes }
    }

    /// Extend the theme catalog from a folder of `.tmTheme` files.
    ///
    /// Each theme is registered under its file stem, so `catppuccin-latte.tmTheme`
    /// becomes addressable as `"catppuccin-latte"`.
    pub fn add_theme_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        self.themes
            .add_from_folder(dir)
            .map_err(|e| ConfigError::ThemeDir {
                dir: dir.display().to_string(),
                source: e,
            })?;

        tracing::info!("loaded extra themes from {}", dir.display());
        Ok(())
    }

    /// Look up a theme by name.
    pub fn theme(&self, name: &str) -> Option<&Theme> {
        self.themes.themes.get(name)
    }

    /// Look up a theme by name, failing with the configuration error that
    /// aborts a build.
    pub fn require_theme(&self, name: &str) -> Result<&Theme, ConfigError> {
        self.theme(name).ok_or_else(|| ConfigError::UnknownTheme {
            name: name.to_string(),
        })
    }

    /// Names of every grammar known to the engine.
    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.syntaxes.syntaxes().iter().map(|s| s.name.as_str())
    }

    /// The grammar catalog, for syntax lookup during rendering.
    pub fn syntaxes(&self) -> &SyntaxSet {
        &self.syntaxes
    }

    #[cfg(test)]
    pub(crate) fn insert_theme(&mut self, name: &str, theme: Theme) {
        self.themes.themes.insert(name.to_string(), theme);
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const MINIMAL_THEME: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>name</key>
    <string>Test Theme</string>
    <key>settings</key>
    <array>
        <dict>
            <key>settings</key>
            <dict>
                <key>foreground</key>
                <string>#4c4f69</string>
                <key>background</key>
                <string>#eff1f5</string>
            </dict>
        </dict>
    </array>
</dict>
</plist>
"#;

    #[test]
    fn bundled_catalog_has_grammars_and_themes() {
        let catalog = Catalog::bundled();

        assert!(catalog.language_names().count() > 0);
        assert!(catalog.theme("base16-ocean.dark").is_some());
        assert!(catalog.theme("Solarized (light)").is_some());
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let catalog = Catalog::bundled();

        let err = catalog.require_theme("not-a-real-theme").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTheme { name } if name == "not-a-real-theme"));
    }

    #[test]
    fn loads_themes_from_folder_by_file_stem() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("catppuccin-latte.tmTheme"), MINIMAL_THEME).unwrap();

        let mut catalog = Catalog::bundled();
        catalog.add_theme_dir(temp.path()).unwrap();

        assert!(catalog.theme("catppuccin-latte").is_some());
    }

    #[test]
    fn missing_theme_folder_is_an_error() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("no-such-dir");

        let mut catalog = Catalog::bundled();
        assert!(catalog.add_theme_dir(&missing).is_err());
    }
}
