//! Show a single post

use anyhow::Result;
use serde::Serialize;

use crate::content::{ContentDocument, ContentIndex};
use crate::helpers::{display_name, format_date, split_blocks, Block};
use crate::Phrasebook;

#[derive(Serialize)]
struct PostView<'a> {
    #[serde(flatten)]
    post: &'a ContentDocument,
    blocks: Vec<Block>,
}

/// Print the post at `category/slug`.
///
/// Returns `Ok(false)` when there is no such post.
pub async fn run(
    site: &Phrasebook,
    index: &ContentIndex,
    category: &str,
    slug: &str,
    json: bool,
) -> Result<bool> {
    let Some(post) = index.by_slug(slug, category).await else {
        println!("Post not found: {}/{}", category, slug);
        return Ok(false);
    };

    let blocks = split_blocks(&post.body);

    if json {
        let view = PostView { post, blocks };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(true);
    }

    let fm = &post.frontmatter;
    println!("{}", fm.title);
    let badge = if fm.featured { "  [Featured]" } else { "" };
    println!("{}{}", display_name(&post.category), badge);
    println!("{}", format_date(&post.date, &site.config.date_format));
    if !fm.tags.is_empty() {
        let tags: Vec<_> = fm.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("{}", tags.join(" "));
    }
    println!();
    println!("{}", fm.description);
    println!();

    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                println!("{} {}", "#".repeat(level as usize), text);
            }
            Block::Quote { text, image } => {
                println!("  > {}", text);
                if let Some(image) = image {
                    println!("    ({})", image);
                }
            }
            Block::Paragraph { text } => println!("{}", text),
        }
        println!();
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemorySource;

    #[tokio::test]
    async fn test_show_found_and_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let site = Phrasebook::new(dir.path()).unwrap();
        let index = ContentIndex::from_source(MemorySource::new().with(
            "wisdom",
            "patience",
            "---\ntitle: Patience\ndescription: D\ndate: 2024-01-01\ntags: [calm]\n---\n# Patience\n\n\"Wait.\"\n",
        ));

        assert!(run(&site, &index, "wisdom", "patience", false).await.unwrap());
        assert!(run(&site, &index, "wisdom", "patience", true).await.unwrap());
        assert!(!run(&site, &index, "love", "patience", false).await.unwrap());
    }
}
