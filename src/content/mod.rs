//! Text helpers shared by the catalog, editorial facade, and renderers.

mod slug;
mod text;

pub use slug::generate_slug;
pub use text::{
    estimate_read_time, extract_hashtags, format_display_date, generate_excerpt, sanitize_html,
    strip_tags, EXCERPT_MAX_CHARS, WORDS_PER_MINUTE,
};
