//! Document sources - where raw post text comes from

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{DocumentKey, SourceError};

/// Raw text of one document plus a description of where it came from
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub origin: String,
    pub text: String,
}

/// Where a source found a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A file on disk
    Path(PathBuf),
    /// Position in an in-memory list
    Index(usize),
}

/// A document found during discovery, not yet read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub key: DocumentKey,
    pub location: Location,
}

/// Supplies documents to the content index.
///
/// Discovery lists every document in a stable order; each one is then read
/// on its own so that one unreadable document does not sink the whole load.
/// Two discovered documents may share a key.
pub trait DocumentSource: Send + Sync {
    /// List all documents, in discovery order
    fn discover(&self) -> Result<Vec<Discovered>, SourceError>;

    /// Read the raw text of a discovered document
    fn read(&self, doc: &Discovered) -> Result<RawDocument, SourceError>;
}

/// Loads `<category>/<slug>.<ext>` files found anywhere below a root
///
/// The category is the name of the directory directly holding the file, so
/// `archive/love/old.mdx` is `love/old`.
pub struct FsSource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FsSource {
    /// Create a source over `root` accepting `.mdx` and `.md` files
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_extensions(root, ["mdx", "md"])
    }

    pub fn with_extensions<P, I, S>(root: P, extensions: I) -> Self
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|ext| ext == e))
            .unwrap_or(false)
    }

    /// Derive `(category, slug)` from a path below the root
    fn key_for(path: &Path) -> Option<DocumentKey> {
        let slug = path.file_stem()?.to_str()?;
        let category = path.parent()?.file_name()?.to_str()?;
        Some(DocumentKey::new(category, slug))
    }
}

impl DocumentSource for FsSource {
    fn discover(&self) -> Result<Vec<Discovered>, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::Missing(self.root.clone()));
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(2)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Losing the root itself means nothing can be listed
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_content_file(path) {
                continue;
            }

            match Self::key_for(path) {
                Some(key) => {
                    tracing::debug!("Discovered {} at {:?}", key, path);
                    found.push(Discovered {
                        key,
                        location: Location::Path(entry.into_path()),
                    });
                }
                None => tracing::warn!("Skipping non UTF-8 path {:?}", path),
            }
        }

        Ok(found)
    }

    fn read(&self, doc: &Discovered) -> Result<RawDocument, SourceError> {
        let Location::Path(path) = &doc.location else {
            return Err(SourceError::Unknown(doc.key.clone()));
        };
        let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(RawDocument {
            origin: path.display().to_string(),
            text,
        })
    }
}

/// In-process documents, e.g. content bundled with `include_str!`
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<(DocumentKey, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document; discovery order follows insertion order
    pub fn with(mut self, category: &str, slug: &str, text: impl Into<String>) -> Self {
        self.documents
            .push((DocumentKey::new(category, slug), text.into()));
        self
    }
}

impl DocumentSource for MemorySource {
    fn discover(&self) -> Result<Vec<Discovered>, SourceError> {
        Ok(self
            .documents
            .iter()
            .enumerate()
            .map(|(i, (key, _))| Discovered {
                key: key.clone(),
                location: Location::Index(i),
            })
            .collect())
    }

    fn read(&self, doc: &Discovered) -> Result<RawDocument, SourceError> {
        let Location::Index(i) = doc.location else {
            return Err(SourceError::Unknown(doc.key.clone()));
        };
        self.documents
            .get(i)
            .filter(|(key, _)| *key == doc.key)
            .map(|(key, text)| RawDocument {
                origin: format!("memory:{}#{}", key, i),
                text: text.clone(),
            })
            .ok_or_else(|| SourceError::Unknown(doc.key.clone()))
    }
}
