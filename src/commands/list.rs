//! List site content

use anyhow::Result;

use crate::content::{ContentDocument, ContentIndex};
use crate::helpers::{category_path, count_label, display_name, format_date, post_path};
use crate::Phrasebook;

/// Filters for `list`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Restrict posts to one category
    pub category: Option<String>,
    /// Override the configured number of entries
    pub count: Option<usize>,
    /// Print JSON instead of text
    pub json: bool,
}

/// List site content by type
pub async fn run(
    site: &Phrasebook,
    index: &ContentIndex,
    content_type: &str,
    options: &ListOptions,
) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts: Vec<&ContentDocument> = match &options.category {
                Some(category) => index.by_category(category).await,
                None => index.load_all().await.iter().collect(),
            };
            let posts = limit(posts, options.count);
            print_posts(site, "Posts", &posts, options.json)?;
        }
        "featured" => {
            let count = options.count.unwrap_or(site.config.featured_limit);
            let posts = limit(index.featured().await, Some(count));
            print_posts(site, "Featured", &posts, options.json)?;
        }
        "recent" => {
            let count = options.count.unwrap_or(site.config.recent_count);
            let posts: Vec<_> = index.recent(count).await.iter().collect();
            print_posts(site, "Recent", &posts, options.json)?;
        }
        "category" | "categories" => {
            let counts = index.category_counts().await;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&counts)?);
            } else {
                println!("Categories ({}):", counts.len());
                for (category, count) in counts {
                    println!(
                        "  {} ({}) [{}]",
                        display_name(&category),
                        count_label(count),
                        category_path(&category)
                    );
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, featured, recent, category",
                content_type
            );
        }
    }

    Ok(())
}

fn limit(mut posts: Vec<&ContentDocument>, count: Option<usize>) -> Vec<&ContentDocument> {
    if let Some(count) = count {
        posts.truncate(count);
    }
    posts
}

fn print_posts(
    site: &Phrasebook,
    heading: &str,
    posts: &[&ContentDocument],
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
        return Ok(());
    }

    println!("{} ({}):", heading, posts.len());
    for post in posts {
        let marker = if post.is_featured() { " *" } else { "" };
        println!(
            "  {} - {}{} [{}]",
            format_date(&post.date, &site.config.date_format),
            post.title(),
            marker,
            post_path(post)
        );
    }
    Ok(())
}
