//! Shortened URL expansion
//!
//! Social APIs rewrite every link in a post to a shortened redirect and hand
//! back the original alongside the text. Reversing that rewrite lets a
//! historical post be compared against freshly rendered feed text.

use crate::types::UrlEntity;

/// Replace every occurrence of each short URL in `text` with its expansion
///
/// Pairs are applied in order as literal substring replacements. Short URLs
/// never overlap one another, so the order does not change the result.
pub fn expand_urls(text: &str, urls: &[UrlEntity]) -> String {
    let mut expanded = text.to_string();
    for entity in urls {
        // An empty needle would match between every character
        if entity.url.is_empty() {
            continue;
        }
        expanded = expanded.replace(&entity.url, &entity.expanded_url);
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_urls_is_identity() {
        let text = "Read my post \"Title\": https://t.co/abc";
        assert_eq!(expand_urls(text, &[]), text);
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let urls = vec![UrlEntity::new("https://t.co/A", "https://example.com/a")];
        assert_eq!(
            expand_urls("x https://t.co/A y https://t.co/A z", &urls),
            "x https://example.com/a y https://example.com/a z"
        );
    }

    #[test]
    fn test_multiple_pairs() {
        let urls = vec![
            UrlEntity::new("https://t.co/A", "https://example.com/a"),
            UrlEntity::new("https://t.co/B", "https://example.com/b"),
        ];
        assert_eq!(
            expand_urls("https://t.co/B and https://t.co/A", &urls),
            "https://example.com/b and https://example.com/a"
        );
    }

    #[test]
    fn test_no_escaping_is_applied() {
        let urls = vec![UrlEntity::new("https://t.co/A", "https://example.com/?q=a&b=\"c\"")];
        assert_eq!(
            expand_urls("see https://t.co/A", &urls),
            "see https://example.com/?q=a&b=\"c\""
        );
    }

    #[test]
    fn test_empty_short_url_is_skipped() {
        let urls = vec![UrlEntity::new("", "https://example.com")];
        assert_eq!(expand_urls("abc", &urls), "abc");
    }

    #[test]
    fn test_unmatched_pair_leaves_text_alone() {
        let urls = vec![UrlEntity::new("https://t.co/zzz", "https://example.com")];
        assert_eq!(expand_urls("nothing here", &urls), "nothing here");
    }
}
