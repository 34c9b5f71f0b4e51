//! Split a post body into display blocks
//!
//! Bodies are plain paragraphs separated by blank lines. This is a display
//! heuristic, not a markdown parser.

use serde::Serialize;

/// Paragraphs shorter than this containing a `"` are shown as quotes
const QUOTE_MAX_CHARS: usize = 200;

/// Number of rotating quote background images
const QUOTE_IMAGES: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Quote {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
    Paragraph {
        text: String,
    },
}

/// Classify each blank-line separated paragraph of `body`.
///
/// Blank paragraphs are dropped but still count towards the index that picks
/// quote images.
pub fn split_blocks(body: &str) -> Vec<Block> {
    let normalized = body.replace("\r\n", "\n");

    normalized
        .split("\n\n")
        .enumerate()
        .filter(|(_, paragraph)| !paragraph.trim().is_empty())
        .map(|(index, paragraph)| classify(index, paragraph.trim_matches('\n')))
        .collect()
}

fn classify(index: usize, paragraph: &str) -> Block {
    if let Some(text) = paragraph.strip_prefix("# ") {
        return Block::Heading {
            level: 1,
            text: text.to_string(),
        };
    }
    if let Some(text) = paragraph.strip_prefix("## ") {
        return Block::Heading {
            level: 2,
            text: text.to_string(),
        };
    }

    if paragraph.contains('"') && paragraph.chars().count() < QUOTE_MAX_CHARS {
        let image = (index % 2 == 0)
            .then(|| format!("/images/quotes/quote-{}.jpg", index % QUOTE_IMAGES + 1));
        return Block::Quote {
            text: paragraph.to_string(),
            image,
        };
    }

    Block::Paragraph {
        text: paragraph.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blocks() {
        let body = "# Love\n\n\"Love is patient.\"\n\n## More\n\nA long reflection without quotes.\n\n\"Another.\"";
        let blocks = split_blocks(body);
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Love".to_string()
                },
                Block::Quote {
                    text: "\"Love is patient.\"".to_string(),
                    image: None,
                },
                Block::Heading {
                    level: 2,
                    text: "More".to_string()
                },
                Block::Paragraph {
                    text: "A long reflection without quotes.".to_string()
                },
                Block::Quote {
                    text: "\"Another.\"".to_string(),
                    image: Some("/images/quotes/quote-5.jpg".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_long_quoted_text_is_paragraph() {
        let long = format!("\"{}\"", "a".repeat(QUOTE_MAX_CHARS));
        assert!(matches!(split_blocks(&long)[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_blank_paragraphs_keep_index() {
        let blocks = split_blocks("\n\n\n\n\"Q\"");
        // "\n\n\n\n\"Q\"" splits into ["", "", "\"Q\""]; the quote sits at index 2
        assert_eq!(
            blocks,
            vec![Block::Quote {
                text: "\"Q\"".to_string(),
                image: Some("/images/quotes/quote-3.jpg".to_string()),
            }]
        );
    }

    #[test]
    fn test_crlf_bodies() {
        let blocks = split_blocks("# Title\r\n\r\nText");
        assert_eq!(blocks.len(), 2);
    }
}
