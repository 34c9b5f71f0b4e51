//! phrasebook: content index for a categorized quote blog
//!
//! Posts live as `<content_dir>/<category>/<slug>.mdx` files with YAML
//! front-matter. [`content::ContentIndex`] loads them once and answers
//! read-only queries; the CLI in `main.rs` is one consumer of it.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::{ContentIndex, FsSource};

/// A site rooted at a base directory
#[derive(Clone)]
pub struct Phrasebook {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (`<category>/<slug>.mdx` files)
    pub content_dir: std::path::PathBuf,
}

impl Phrasebook {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Build the content index over the configured content directory.
    ///
    /// Nothing is read until the first query.
    pub fn index(&self) -> ContentIndex {
        let source = FsSource::with_extensions(&self.content_dir, self.config.extensions.clone());
        ContentIndex::new(Arc::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_site_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "content_dir: posts\n").unwrap();
        let love = dir.path().join("posts/love");
        fs::create_dir_all(&love).unwrap();
        fs::write(
            love.join("first.mdx"),
            "---\ntitle: First\ndescription: D\ndate: 2024-01-01\n---\n\"Hi\"\n",
        )
        .unwrap();

        let site = Phrasebook::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("posts"));

        let index = site.index();
        let doc = index.by_slug("first", "love").await.unwrap();
        assert_eq!(doc.title(), "First");
    }

    #[tokio::test]
    async fn test_missing_content_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let site = Phrasebook::new(dir.path()).unwrap();
        let index = site.index();
        assert!(index.load_all().await.is_empty());
        assert_eq!(index.diagnostics().await.len(), 1);
    }
}
