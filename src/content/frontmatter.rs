//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::ParseError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter exactly as written in the document
///
/// Every field is optional here; [`RawFrontMatter::validate`] enforces the
/// required ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub featured: bool,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

/// Validated front-matter of a post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    /// Date as written in the source
    pub date: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub featured: bool,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl RawFrontMatter {
    /// Split a document into its YAML front-matter and body.
    ///
    /// The document must open with a `---` line; the block ends at the next
    /// line starting with `---`.
    pub fn parse(content: &str) -> Result<(Self, &str), ParseError> {
        let content = content.trim_start();
        let rest = content
            .strip_prefix("---")
            .ok_or(ParseError::MissingFrontMatter)?;
        let rest = rest.trim_start_matches([' ', '\t']);
        let rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .ok_or(ParseError::MissingFrontMatter)?;

        let (yaml_content, remaining) = if let Some(body) = rest.strip_prefix("---") {
            ("", body)
        } else {
            let end_pos = rest.find("\n---").ok_or(ParseError::Unterminated)?;
            (&rest[..end_pos], &rest[end_pos + 4..])
        };

        // Drop whatever follows the closing fence on its own line
        let remaining = match remaining.find('\n') {
            Some(pos) => &remaining[pos + 1..],
            None => "",
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((RawFrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<RawFrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    /// Check required fields and fill in the category when absent.
    ///
    /// Returns the validated front-matter and the parsed publication date.
    pub fn validate(
        self,
        default_category: &str,
    ) -> Result<(FrontMatter, NaiveDateTime), ParseError> {
        let title = required(self.title, "title")?;
        let description = required(self.description, "description")?;
        let date = required(self.date, "date")?;
        let parsed =
            parse_date_string(&date).ok_or_else(|| ParseError::InvalidDate(date.clone()))?;

        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_category.to_string());

        Ok((
            FrontMatter {
                title,
                description,
                date,
                category,
                image: self.image.filter(|i| !i.trim().is_empty()),
                featured: self.featured,
                tags: self.tags,
                extra: self.extra,
            },
            parsed,
        ))
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ParseError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ParseError::MissingField(field)),
    }
}

/// Parse a date string in the formats posts use in practice
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, compared in UTC
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}
