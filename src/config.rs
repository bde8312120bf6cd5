//! Render configuration.
//!
//! ```
//! use sitegen::config::RenderConfig;
//!
//! let config = RenderConfig::from_toml_str("root_class = \"content\"").unwrap();
//! assert_eq!(config.root_tag, "div");
//! assert_eq!(config.root_class.as_deref(), Some("content"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options for [`crate::render_html::Renderer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Tag of the container wrapping every block (default `div`).
    pub root_tag: String,
    /// Optional `class` attribute for the container.
    pub root_class: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            root_tag: "div".to_string(),
            root_class: None,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the text is not valid TOML or a
    /// key has the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}
