//! Post text templates
//!
//! A template is literal text with `{{ .Field }}` actions that pull values
//! out of a [`FeedItem`]:
//!
//! ```
//! use libatomitter::template::Template;
//! use libatomitter::types::FeedItem;
//!
//! let template = Template::compile("Read my post \"{{ .Title }}\": {{ .Link }}").unwrap();
//! let item = FeedItem::new("Example Title", "https://example.com");
//! assert_eq!(
//!     template.render(&item),
//!     "Read my post \"Example Title\": https://example.com"
//! );
//! ```
//!
//! Templates are validated when compiled, so a malformed format string is
//! reported before any network I/O happens. Rendering itself cannot fail: a
//! field the item does not carry renders as an empty string.
//!
//! `.Published` and `.Updated` render as RFC 3339 timestamps and
//! `.Categories` as a `, `-separated list. Feeds spell dates many ways, so
//! the raw strings from the document are not kept. A format that uses these
//! fields therefore renders differently from tools that print the feed's own
//! date text or a `[a b]`-style list, and items posted by such a tool are not
//! recognised and will be posted again once.

use std::fmt;

use crate::error::TemplateError;
use crate::types::FeedItem;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Feed item fields a template may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Link,
    Description,
    Content,
    Guid,
    Author,
    Published,
    Updated,
    Categories,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Title" => Some(Field::Title),
            "Link" => Some(Field::Link),
            "Description" => Some(Field::Description),
            "Content" => Some(Field::Content),
            "GUID" => Some(Field::Guid),
            "Author" => Some(Field::Author),
            "Published" => Some(Field::Published),
            "Updated" => Some(Field::Updated),
            "Categories" => Some(Field::Categories),
            _ => None,
        }
    }

    fn write_value(self, item: &FeedItem, out: &mut String) {
        match self {
            Field::Title => out.push_str(&item.title),
            Field::Link => out.push_str(&item.link),
            Field::Description => out.push_str(item.description.as_deref().unwrap_or_default()),
            Field::Content => out.push_str(item.content.as_deref().unwrap_or_default()),
            Field::Guid => out.push_str(item.guid.as_deref().unwrap_or_default()),
            Field::Author => out.push_str(item.author.as_deref().unwrap_or_default()),
            Field::Published => {
                if let Some(published) = item.published {
                    out.push_str(&published.to_rfc3339());
                }
            }
            Field::Updated => {
                if let Some(updated) = item.updated {
                    out.push_str(&updated.to_rfc3339());
                }
            }
            Field::Categories => out.push_str(&item.categories.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A compiled post template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if an action is unclosed, empty, not a
    /// field reference, or names a field feed items do not have.
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let action_start = start + OPEN.len();
            let end = rest[action_start..]
                .find(CLOSE)
                .ok_or(TemplateError::Unclosed(offset + start))?;
            let action = rest[action_start..action_start + end].trim();

            segments.push(Segment::Field(parse_action(action, offset + start)?));

            let consumed = action_start + end + CLOSE.len();
            rest = &rest[consumed..];
            offset += consumed;
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Render the post text for a feed item
    pub fn render(&self, item: &FeedItem) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => field.write_value(item, &mut out),
            }
        }
        out
    }

    /// The template string this was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_action(action: &str, position: usize) -> Result<Field, TemplateError> {
    if action.is_empty() {
        return Err(TemplateError::EmptyAction(position));
    }

    let name = action
        .strip_prefix('.')
        .ok_or_else(|| TemplateError::InvalidAction(action.to_string()))?;

    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(TemplateError::InvalidAction(action.to_string()));
    }

    Field::from_name(name).ok_or_else(|| TemplateError::UnknownField(name.to_string()))
}
