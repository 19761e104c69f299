//! Site configuration (glint.toml).
//!
//! One schema serves every deployment: fields that used to differ between
//! environments (the base path, environment-specific navbar items) are
//! resolved against an explicit [`DeploymentTarget`] instead of living in
//! per-environment copies of the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use glint_highlight::ThemePair;

/// Where the built site is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTarget {
    /// A custom domain; the site lives at the root.
    Custom,
    /// The host's default project domain; the site lives under the project
    /// slug.
    Default,
}

/// Site configuration, loaded from `glint.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub tagline: String,

    #[serde(default = "default_favicon")]
    pub favicon: String,

    /// Canonical site URL.
    #[serde(default)]
    pub url: String,

    /// Project slug used as the base path on the host's default domain.
    #[serde(default)]
    pub project_slug: String,

    #[serde(default)]
    pub highlight: HighlightSettings,

    #[serde(default)]
    pub navbar: NavbarConfig,

    #[serde(default)]
    pub docs: DocsConfig,
}

/// Highlight pipeline settings: the theme pair and an optional folder of
/// extra `.tmTheme` files to extend the engine's catalog with.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HighlightSettings {
    #[serde(default = "default_light_theme")]
    pub light: String,

    #[serde(default = "default_dark_theme")]
    pub dark: String,

    #[serde(default)]
    pub theme_dir: Option<PathBuf>,
}

/// Navbar layout.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NavbarConfig {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub logo: Option<LogoConfig>,

    #[serde(default)]
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogoConfig {
    pub alt: String,
    pub src: String,
}

/// One navbar link.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NavItem {
    pub label: String,
    pub href: String,

    #[serde(default = "default_position")]
    pub position: String,

    /// Restricts the item to a single deployment target. Unset items appear
    /// everywhere.
    #[serde(default)]
    pub only: Option<DeploymentTarget>,
}

/// Docs-specific settings consumed by the surrounding generator.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DocsConfig {
    /// Base URL for "edit this page" links.
    #[serde(default)]
    pub edit_url: Option<String>,

    /// Extra stylesheet applied after the default theme.
    #[serde(default)]
    pub custom_css: Option<String>,
}

fn default_title() -> String {
    "Documentation".to_string()
}
fn default_favicon() -> String {
    "img/favicon.ico".to_string()
}
fn default_light_theme() -> String {
    "catppuccin-latte".to_string()
}
fn default_dark_theme() -> String {
    "catppuccin-macchiato".to_string()
}
fn default_position() -> String {
    "right".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: String::new(),
            favicon: default_favicon(),
            url: String::new(),
            project_slug: String::new(),
            highlight: HighlightSettings::default(),
            navbar: NavbarConfig::default(),
            docs: DocsConfig::default(),
        }
    }
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            light: default_light_theme(),
            dark: default_dark_theme(),
            theme_dir: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let content = fs::read_to_string(path).map_err(|e| SiteError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: SiteConfig = toml::from_str(&content).map_err(|e| SiteError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;

        tracing::info!("loaded site config from {}", path.display());
        Ok(config)
    }

    /// Base path the site is served under for a deployment target.
    pub fn base_url(&self, target: DeploymentTarget) -> String {
        match target {
            DeploymentTarget::Custom => "/".to_string(),
            DeploymentTarget::Default => {
                let slug = self.project_slug.trim_matches('/');
                if slug.is_empty() {
                    "/".to_string()
                } else {
                    format!("/{slug}/")
                }
            }
        }
    }

    /// Navbar items visible on a deployment target.
    pub fn navbar_items(&self, target: DeploymentTarget) -> Vec<&NavItem> {
        self.navbar
            .items
            .iter()
            .filter(|item| item.only.is_none() || item.only == Some(target))
            .collect()
    }

    /// The configured theme pair, ready for the highlight configuration
    /// build.
    pub fn theme_pair(&self) -> ThemePair {
        ThemePair::new(&self.highlight.light, &self.highlight.dark)
    }
}

/// Errors raised while loading the site configuration.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("failed to read site config {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site config {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
