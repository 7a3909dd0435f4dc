//! URL slug derivation.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").ok());
static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());
static DASH_RUNS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"-+").ok());

/// Derives a URL-safe slug from a title.
///
/// Lowercases, drops everything except ASCII letters, digits, whitespace and
/// dashes, turns whitespace runs into single dashes, and collapses repeated
/// dashes. Leading and trailing dashes are trimmed.
///
/// # Examples
///
/// ```
/// use techledger::content::generate_slug;
///
/// assert_eq!(generate_slug("OpenAI Releases GPT-5!"), "openai-releases-gpt-5");
/// assert_eq!(generate_slug("  Web3 -- & DeFi  "), "web3-defi");
/// ```
#[must_use]
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let kept = replace(&DISALLOWED, &lowered, "");
    let dashed = replace(&WHITESPACE, &kept, "-");
    let collapsed = replace(&DASH_RUNS, &dashed, "-");
    collapsed.trim_matches('-').to_owned()
}

fn replace(pattern: &LazyLock<Option<Regex>>, input: &str, with: &str) -> String {
    pattern.as_ref().map_or_else(
        || input.to_owned(),
        |regex| regex.replace_all(input, with).into_owned(),
    )
}
