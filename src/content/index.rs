//! Content index - lazily loaded, read-only queries over all posts

use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::loader::{self, Snapshot};
use super::source::DocumentSource;
use super::{ContentDocument, Diagnostic};

/// Queryable view over every post of a [`DocumentSource`].
///
/// The source is loaded on the first query and the result is kept for the
/// lifetime of the index. Concurrent first callers share one load.
pub struct ContentIndex {
    source: Arc<dyn DocumentSource>,
    snapshot: OnceCell<Snapshot>,
}

impl ContentIndex {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self {
            source,
            snapshot: OnceCell::new(),
        }
    }

    pub fn from_source<S: DocumentSource + 'static>(source: S) -> Self {
        Self::new(Arc::new(source))
    }

    /// Whether the first load has completed
    pub fn is_loaded(&self) -> bool {
        self.snapshot.initialized()
    }

    async fn snapshot(&self) -> &Snapshot {
        self.snapshot
            .get_or_init(|| async {
                let source = Arc::clone(&self.source);
                match tokio::task::spawn_blocking(move || loader::load(source.as_ref())).await {
                    Ok(snapshot) => snapshot,
                    Err(e) => Snapshot::failed(Diagnostic {
                        key: None,
                        message: format!("content load task failed: {}", e),
                    }),
                }
            })
            .await
    }

    /// All posts, newest first
    pub async fn load_all(&self) -> &[ContentDocument] {
        &self.snapshot().await.documents
    }

    /// Posts whose category matches exactly
    pub async fn by_category(&self, category: &str) -> Vec<&ContentDocument> {
        self.load_all()
            .await
            .iter()
            .filter(|doc| doc.category == category)
            .collect()
    }

    /// Posts flagged `featured: true`
    pub async fn featured(&self) -> Vec<&ContentDocument> {
        self.load_all()
            .await
            .iter()
            .filter(|doc| doc.is_featured())
            .collect()
    }

    /// The `count` newest posts
    pub async fn recent(&self, count: usize) -> &[ContentDocument] {
        let all = self.load_all().await;
        &all[..count.min(all.len())]
    }

    /// Distinct categories in first-seen order
    pub async fn all_categories(&self) -> Vec<String> {
        self.category_counts().await.into_keys().collect()
    }

    /// Number of posts per category, in first-seen order
    pub async fn category_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for doc in self.load_all().await {
            *counts.entry(doc.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The post at `category/slug`, if there is one
    pub async fn by_slug(&self, slug: &str, category: &str) -> Option<&ContentDocument> {
        self.load_all()
            .await
            .iter()
            .find(|doc| doc.matches(slug, category))
    }

    /// Problems recorded while loading
    pub async fn diagnostics(&self) -> &[Diagnostic] {
        &self.snapshot().await.diagnostics
    }
}
