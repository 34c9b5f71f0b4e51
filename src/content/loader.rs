//! Content loader - turns a document source into a sorted snapshot

use indexmap::IndexMap;

use super::frontmatter::RawFrontMatter;
use super::source::{DocumentSource, RawDocument};
use super::{ContentDocument, Diagnostic, DocumentKey, ParseError};

/// The fully loaded, immutable document set
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Documents sorted newest first
    pub documents: Vec<ContentDocument>,
    /// Problems met while loading
    pub diagnostics: Vec<Diagnostic>,
}

impl Snapshot {
    /// An empty snapshot standing in for a load that could not happen
    pub fn failed(diagnostic: Diagnostic) -> Self {
        tracing::warn!("Content unavailable, serving empty index: {}", diagnostic);
        Self {
            documents: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }
}

/// Load every document from `source`.
///
/// Never fails: a source that cannot be listed yields an empty snapshot, and
/// documents that cannot be read or parsed are skipped. Both cases are
/// recorded as diagnostics.
pub fn load(source: &dyn DocumentSource) -> Snapshot {
    let start = std::time::Instant::now();

    let found = match source.discover() {
        Ok(found) => found,
        Err(e) => return Snapshot::failed(Diagnostic::source_failure(&e)),
    };

    let mut diagnostics = Vec::new();
    // Value is (discovery position, document); a later copy replaces the
    // value but keeps the first copy's slot
    let mut by_key: IndexMap<DocumentKey, (usize, ContentDocument)> =
        IndexMap::with_capacity(found.len());

    for (position, entry) in found.iter().enumerate() {
        let key = &entry.key;
        let parsed = source
            .read(entry)
            .map_err(|e| e.to_string())
            .and_then(|raw| parse_document(key, raw).map_err(|e| e.to_string()));

        match parsed {
            Ok(doc) => {
                tracing::debug!("Loaded {} ({})", key, doc.frontmatter.date);
                if let Some((previous, _)) = by_key.insert(key.clone(), (position, doc)) {
                    tracing::warn!(
                        "Duplicate document {}: #{} replaces #{}",
                        key,
                        position,
                        previous
                    );
                }
            }
            Err(message) => {
                let diagnostic = Diagnostic::document(key, message);
                tracing::warn!("Failed to load post {}", diagnostic);
                diagnostics.push(diagnostic);
            }
        }
    }

    let mut documents: Vec<ContentDocument> = by_key.into_values().map(|(_, doc)| doc).collect();

    // Newest first; sort_by is stable so equal dates keep discovery order
    documents.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::info!(
        "Loaded {} posts ({} skipped) in {:.1}ms",
        documents.len(),
        diagnostics.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Snapshot {
        documents,
        diagnostics,
    }
}

/// Parse one raw document into a [`ContentDocument`]
pub fn parse_document(
    key: &DocumentKey,
    raw: RawDocument,
) -> Result<ContentDocument, ParseError> {
    let (fm, body) = RawFrontMatter::parse(&raw.text)?;
    let (frontmatter, date) = fm.validate(&key.category)?;

    if frontmatter.category != key.category {
        tracing::debug!(
            "{} declares category {:?}; using directory category",
            key,
            frontmatter.category
        );
    }

    Ok(ContentDocument {
        slug: key.slug.clone(),
        category: key.category.clone(),
        body: body.to_string(),
        frontmatter,
        date,
        source: raw.origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::source::{Discovered, FsSource, Location, MemorySource};
    use crate::content::SourceError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn post(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\ndescription: about {title}\ndate: {date}\n---\nBody of {title}\n")
    }

    #[test]
    fn test_load_sorts_newest_first() {
        let source = MemorySource::new()
            .with("love", "a", post("A", "2024-01-01"))
            .with("wisdom", "b", post("B", "2024-03-01"))
            .with("love", "c", post("C", "2024-02-01"));

        let snapshot = load(&source);
        let slugs: Vec<_> = snapshot.documents.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "c", "a"]);
        assert!(snapshot.diagnostics.is_empty());
    }

    #[test]
    fn test_equal_dates_keep_discovery_order() {
        let source = MemorySource::new()
            .with("love", "first", post("First", "2024-05-05"))
            .with("love", "second", post("Second", "2024-05-05"))
            .with("love", "third", post("Third", "2024-05-05"));

        let snapshot = load(&source);
        let slugs: Vec<_> = snapshot.documents.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_malformed_document_is_skipped() {
        let source = MemorySource::new()
            .with("love", "ok", post("Ok", "2024-01-01"))
            .with("love", "no-date", "---\ntitle: X\ndescription: Y\n---\n")
            .with("wisdom", "fine", post("Fine", "2024-02-01"));

        let snapshot = load(&source);
        assert_eq!(snapshot.documents.len(), 2);
        assert_eq!(snapshot.diagnostics.len(), 1);
        assert_eq!(
            snapshot.diagnostics[0].key,
            Some(DocumentKey::new("love", "no-date"))
        );
        assert!(snapshot.diagnostics[0].message.contains("date"));
    }

    #[test]
    fn test_duplicate_key_last_wins_in_first_slot() {
        let source = MemorySource::new()
            .with("love", "same", post("Old", "2024-05-05"))
            .with("love", "other", post("Other", "2024-05-05"))
            .with("love", "same", post("New", "2024-05-05"));

        let snapshot = load(&source);
        let titles: Vec<_> = snapshot.documents.iter().map(|d| d.title()).collect();
        assert_eq!(titles, vec!["New", "Other"]);
        assert!(snapshot.documents[0].source.ends_with("#2"));
    }

    /// Hands out a different document on every read, whatever the key
    struct Rotating {
        reads: AtomicUsize,
    }

    impl DocumentSource for Rotating {
        fn discover(&self) -> Result<Vec<Discovered>, SourceError> {
            let entry = |slug: &str| Discovered {
                key: DocumentKey::new("love", slug),
                location: Location::Index(0),
            };
            Ok(vec![entry("dup"), entry("mid"), entry("dup")])
        }

        fn read(&self, doc: &Discovered) -> Result<RawDocument, SourceError> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(RawDocument {
                origin: format!("read-{}", n),
                text: post(&format!("{} {}", doc.key.slug, n), "2024-01-01"),
            })
        }
    }

    #[test]
    fn test_duplicate_key_keeps_later_read() {
        let snapshot = load(&Rotating {
            reads: AtomicUsize::new(0),
        });
        let titles: Vec<_> = snapshot.documents.iter().map(|d| d.title()).collect();
        assert_eq!(titles, vec!["dup 2", "mid 1"]);
        assert_eq!(snapshot.documents[0].source, "read-2");
    }

    #[test]
    fn test_duplicate_files_in_nested_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        for (rel, title) in [("a/love/x.mdx", "From A"), ("b/love/x.mdx", "From B")] {
            let path = dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, post(title, "2024-01-01")).unwrap();
        }

        let snapshot = load(&FsSource::new(dir.path()));
        assert_eq!(snapshot.documents.len(), 1);
        assert_eq!(snapshot.documents[0].title(), "From B");
        assert!(snapshot.diagnostics.is_empty());
    }

    struct Unavailable;

    impl DocumentSource for Unavailable {
        fn discover(&self) -> Result<Vec<Discovered>, SourceError> {
            Err(SourceError::Missing("content".into()))
        }

        fn read(&self, doc: &Discovered) -> Result<RawDocument, SourceError> {
            Err(SourceError::Unknown(doc.key.clone()))
        }
    }

    #[test]
    fn test_unavailable_source_is_empty() {
        let snapshot = load(&Unavailable);
        assert!(snapshot.documents.is_empty());
        assert_eq!(snapshot.diagnostics.len(), 1);
        assert!(snapshot.diagnostics[0].key.is_none());
    }

    #[test]
    fn test_parse_document_fields() {
        let raw = RawDocument {
            origin: "memory:love/a".to_string(),
            text: "---\ntitle: A\ndescription: D\ndate: 2024-01-01\ncategory: romance\nimage: /img/a.jpg\n---\n\"Quote\"\n".to_string(),
        };
        let doc = parse_document(&DocumentKey::new("love", "a"), raw).unwrap();
        assert_eq!(doc.category, "love");
        assert_eq!(doc.frontmatter.category, "romance");
        assert_eq!(doc.frontmatter.image.as_deref(), Some("/img/a.jpg"));
        assert_eq!(doc.body, "\"Quote\"\n");
        assert_eq!(doc.source, "memory:love/a");
    }
}
