//! Presentation helpers shared by the CLI and other consumers of the index

mod blocks;
mod date;

pub use blocks::*;
pub use date::*;

use crate::content::ContentDocument;

/// Category as shown to readers: first letter upper-cased
pub fn display_name(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Site path of a post page
pub fn post_path(doc: &ContentDocument) -> String {
    format!("/post/{}/{}", doc.category, doc.slug)
}

/// Site path of a category listing
pub fn category_path(category: &str) -> String {
    format!("/category/{}", category)
}

/// "1 post" / "3 posts"
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 post".to_string()
    } else {
        format!("{} posts", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("love"), "Love");
        assert_eq!(display_name("élan"), "Élan");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_paths_and_labels() {
        assert_eq!(category_path("wisdom"), "/category/wisdom");
        assert_eq!(count_label(1), "1 post");
        assert_eq!(count_label(0), "0 posts");
        assert_eq!(count_label(12), "12 posts");
    }
}
