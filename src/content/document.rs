//! Content document model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::FrontMatter;

/// Identity of a document: unique per `(category, slug)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentKey {
    pub category: String,
    pub slug: String,
}

impl DocumentKey {
    pub fn new(category: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            slug: slug.into(),
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.slug)
    }
}

/// A loaded, normalized post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDocument {
    /// Slug (file stem)
    pub slug: String,

    /// Category (parent directory name)
    pub category: String,

    /// Validated front-matter
    pub frontmatter: FrontMatter,

    /// Raw body text, front-matter stripped
    pub body: String,

    /// Publication date parsed from `frontmatter.date`
    #[serde(skip)]
    pub date: NaiveDateTime,

    /// Where the document came from (file path or `memory:` key)
    #[serde(skip)]
    pub source: String,
}

impl ContentDocument {
    pub fn matches(&self, slug: &str, category: &str) -> bool {
        self.slug == slug && self.category == category
    }

    pub fn is_featured(&self) -> bool {
        self.frontmatter.featured
    }

    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = DocumentKey::new("love", "first-sight");
        assert_eq!(key.to_string(), "love/first-sight");
    }
}
