//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,

    // Content
    /// Directory holding `<category>/<slug>.mdx`, relative to the base dir
    pub content_dir: String,
    /// Accepted file extensions, without the dot
    pub extensions: Vec<String>,

    // Listing
    pub recent_count: usize,
    pub featured_limit: usize,

    // Date format (Moment.js style)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "PhraseQuote".to_string(),
            description: String::new(),

            content_dir: "src/content/posts".to_string(),
            extensions: vec!["mdx".to_string(), "md".to_string()],

            recent_count: 6,
            featured_limit: 3,

            date_format: "MMMM D, YYYY".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }
}
