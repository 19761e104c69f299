//! Site-level configuration and the pre-render plugin pipeline.

pub mod config;
pub mod plugin;

pub use config::{
    DeploymentTarget, DocsConfig, HighlightSettings, LogoConfig, NavItem, NavbarConfig,
    SiteConfig, SiteError,
};
pub use plugin::{HighlightPlugin, PluginList, PrerenderPlugin};
