//! Content module - loads posts and answers queries over them

mod document;
mod error;
mod frontmatter;
pub mod index;
pub mod loader;
pub mod source;

pub use document::{ContentDocument, DocumentKey};
pub use error::{Diagnostic, ParseError, SourceError};
pub use frontmatter::{parse_date_string, FrontMatter, RawFrontMatter};
pub use index::ContentIndex;
pub use source::{Discovered, DocumentSource, FsSource, Location, MemorySource, RawDocument};
