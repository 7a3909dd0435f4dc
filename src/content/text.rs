//! Read-time estimates, excerpts, hashtags, and HTML clean-up.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Reading speed used by [`estimate_read_time`].
pub const WORDS_PER_MINUTE: u64 = 200;

/// Default excerpt length in characters, before the trailing ellipsis.
pub const EXCERPT_MAX_CHARS: usize = 150;

static TAGS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());
static HASHTAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"#(\w+)").ok());
static SCRIPT_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").ok());
static IFRAME_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<iframe\b.*?</iframe>").ok());
static JS_SCHEME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?i)javascript:").ok());
static EVENT_HANDLER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").ok());

fn remove(pattern: &LazyLock<Option<Regex>>, input: &str) -> String {
    pattern.as_ref().map_or_else(
        || input.to_owned(),
        |regex| regex.replace_all(input, "").into_owned(),
    )
}

/// Estimates the reading time label, e.g. `"5 min read"`.
///
/// Words are whitespace-separated runs. The estimate rounds up and never
/// drops below one minute.
///
/// # Examples
///
/// ```
/// use techledger::content::estimate_read_time;
///
/// assert_eq!(estimate_read_time("word ".repeat(401).as_str()), "3 min read");
/// assert_eq!(estimate_read_time(""), "1 min read");
/// ```
#[must_use]
pub fn estimate_read_time(content: &str) -> String {
    let words = u64::try_from(content.split_whitespace().count()).unwrap_or(u64::MAX);
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}

/// Removes anything that looks like an HTML tag.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    remove(&TAGS, html)
}

/// Builds a plain-text excerpt of at most `max_chars` characters.
///
/// Text longer than the limit is cut, trimmed, and suffixed with `...`.
#[must_use]
pub fn generate_excerpt(content: &str, max_chars: usize) -> String {
    let plain = strip_tags(content);
    if plain.chars().count() <= max_chars {
        return plain;
    }

    let cut: String = plain.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// Extracts `#hashtag` words from free text, without the leading `#`.
#[must_use]
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let Some(regex) = HASHTAG.as_ref() else {
        return Vec::new();
    };

    regex
        .captures_iter(content)
        .filter_map(|captures| captures.get(1))
        .map(|word| word.as_str().to_owned())
        .collect()
}

/// Strips script and iframe blocks, `javascript:` schemes, and inline
/// event handler attributes.
///
/// This is a coarse filter for trusted editorial content, not a full HTML
/// sanitiser.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let without_scripts = remove(&SCRIPT_BLOCK, html);
    let without_iframes = remove(&IFRAME_BLOCK, &without_scripts);
    let without_scheme = remove(&JS_SCHEME, &without_iframes);
    remove(&EVENT_HANDLER, &without_scheme)
}

/// Formats a timestamp as `"January 15, 2025"`.
#[must_use]
pub fn format_display_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}
