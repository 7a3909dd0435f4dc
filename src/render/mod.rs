//! Text rendering of listings, articles, and categories via `minijinja`.
//!
//! Each view has a built-in template; listings also accept a user template.
//!
//! # Listing variables
//!
//! - `page`, `total_pages`, `total_items`, `has_next`, `has_prev`
//! - `query` (encoded filter) and `active_filters` (bool)
//! - `articles`: cards with `title`, `slug`, `url`, `excerpt`, `category`,
//!   `author`, `date`, `read_time`, `tags`, `featured`

use std::io::Write;

use minijinja::{AutoEscape, Environment, Value, context};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::models::{Article, Category};
use crate::content::{
    EXCERPT_MAX_CHARS, format_display_date, generate_excerpt, sanitize_html, strip_tags,
};
use crate::listing::{ListingFilter, Page, serialize};

const LISTING_TEMPLATE: &str = r#"{% for a in articles %}
{{ a.title }}{{ " [featured]" if a.featured else "" }}
  {{ a.category }} | {{ a.author }} | {{ a.date }}{{ (" | " ~ a.read_time) if a.read_time else "" }}
  {{ a.excerpt }}
  {{ a.url }}

{% else %}
No articles found.
{% endfor %}
Page {{ page }} of {{ total_pages }} ({{ total_items }} articles)
"#;

const ARTICLE_TEMPLATE: &str = r#"{{ article.title }}
{{ article.category }} | {{ article.author }} | {{ article.date }}{{ (" | " ~ article.read_time) if article.read_time else "" }}
{% if article.tags %}
Tags: {{ article.tags | join(", ") }}
{% endif %}

{{ body }}
{% if related %}

Related:
{% for r in related %}
- {{ r.title }} ({{ r.url }})
{% endfor %}
{% endif %}
"#;

const CATEGORIES_TEMPLATE: &str = r"{% for c in categories %}
{{ c.name }} ({{ c.article_count }}) {{ c.url }}
{% else %}
No categories found.
{% endfor %}
";

/// Template-facing view of an article.
#[derive(Debug, Clone, Serialize)]
struct ArticleCard {
    title: String,
    slug: String,
    url: String,
    excerpt: String,
    category: String,
    author: String,
    date: String,
    read_time: String,
    tags: Vec<String>,
    featured: bool,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        let excerpt = if article.excerpt.trim().is_empty() {
            generate_excerpt(&article.content, EXCERPT_MAX_CHARS)
        } else {
            article.excerpt.clone()
        };
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            url: format!("/articles/{}", article.slug),
            excerpt,
            category: article.category.clone(),
            author: article.author.clone(),
            date: format_display_date(&article.published_at),
            read_time: article.read_time.clone().unwrap_or_default(),
            tags: article.tags.clone(),
            featured: article.featured,
        }
    }
}

/// Template-facing view of a category.
#[derive(Debug, Clone, Serialize)]
struct CategoryCard<'a> {
    name: &'a str,
    slug: &'a str,
    url: String,
    article_count: u64,
}

impl<'a> From<&'a Category> for CategoryCard<'a> {
    fn from(category: &'a Category) -> Self {
        Self {
            name: &category.name,
            slug: &category.slug,
            url: format!("/categories/{}", category.slug),
            article_count: category.article_count,
        }
    }
}

fn render(name: &str, template: &str, ctx: Value) -> Result<String, ApiError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template(name, template)
        .map_err(|error| ApiError::Configuration {
            message: format!("invalid template syntax: {error}"),
        })?;

    let tmpl = env.get_template(name).map_err(|error| ApiError::Configuration {
        message: format!("failed to retrieve template: {error}"),
    })?;

    tmpl.render(ctx).map_err(|error| ApiError::Configuration {
        message: format!("template rendering failed: {error}"),
    })
}

fn write_output<W: Write>(writer: &mut W, output: &str) -> Result<(), ApiError> {
    writer
        .write_all(output.as_bytes())
        .map_err(|error| ApiError::io(&error))
}

/// Renders a listing page to a string.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when the template is invalid or
/// fails to render.
pub fn render_listing(
    page: &Page<Article>,
    filter: &ListingFilter,
    template: Option<&str>,
) -> Result<String, ApiError> {
    let cards: Vec<ArticleCard> = page.items().iter().map(ArticleCard::from).collect();
    let ctx = context! {
        page => page.page_number(),
        total_pages => page.total_pages(),
        total_items => page.total_items(),
        has_next => page.has_next(),
        has_prev => page.has_prev(),
        query => serialize(filter),
        active_filters => filter.has_active_filters(),
        articles => cards,
    };
    render("listing", template.unwrap_or(LISTING_TEMPLATE), ctx)
}

/// Writes a listing page.
///
/// # Errors
///
/// See [`render_listing`]; also returns [`ApiError::Io`] when writing fails.
pub fn write_listing<W: Write>(
    writer: &mut W,
    page: &Page<Article>,
    filter: &ListingFilter,
    template: Option<&str>,
) -> Result<(), ApiError> {
    write_output(writer, &render_listing(page, filter, template)?)
}

/// Renders one article, its sanitised plain-text body, and related links.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when rendering fails.
pub fn render_article(article: &Article, related: &[Article]) -> Result<String, ApiError> {
    let related_cards: Vec<ArticleCard> = related.iter().map(ArticleCard::from).collect();
    let body = strip_tags(&sanitize_html(&article.content));
    let ctx = context! {
        article => ArticleCard::from(article),
        body => body.trim(),
        related => related_cards,
    };
    render("article", ARTICLE_TEMPLATE, ctx)
}

/// Writes one article.
///
/// # Errors
///
/// See [`render_article`]; also returns [`ApiError::Io`] when writing fails.
pub fn write_article<W: Write>(
    writer: &mut W,
    article: &Article,
    related: &[Article],
) -> Result<(), ApiError> {
    write_output(writer, &render_article(article, related)?)
}

/// Renders the category index.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when rendering fails.
pub fn render_categories(categories: &[Category]) -> Result<String, ApiError> {
    let cards: Vec<CategoryCard<'_>> = categories.iter().map(CategoryCard::from).collect();
    render(
        "categories",
        CATEGORIES_TEMPLATE,
        context! { categories => cards },
    )
}

/// Writes the category index.
///
/// # Errors
///
/// See [`render_categories`]; also returns [`ApiError::Io`] when writing
/// fails.
pub fn write_categories<W: Write>(
    writer: &mut W,
    categories: &[Category],
) -> Result<(), ApiError> {
    write_output(writer, &render_categories(categories)?)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{render_article, render_categories, render_listing, write_listing};
    use crate::api::error::ApiError;
    use crate::api::models::test_support::{article, category};
    use crate::api::models::Article;
    use crate::listing::{ListingFilter, Page, PageSize};

    #[fixture]
    fn gpt() -> Article {
        let mut item = article("2", "OpenAI Releases GPT-5", "Artificial Intelligence");
        item.featured = true;
        item.tags = vec!["AI".to_owned(), "GPT-5".to_owned()];
        item.read_time = Some("7 min read".to_owned());
        item.content = "<p onclick=\"x()\">Big news.</p><script>alert(1)</script>".to_owned();
        item
    }

    #[rstest]
    fn default_listing_shows_cards_and_position(gpt: Article) {
        let page = Page::new(vec![gpt], 1, PageSize::default(), 10);

        let output = render_listing(&page, &ListingFilter::default(), None).expect("render");

        assert_eq!(
            output,
            concat!(
                "OpenAI Releases GPT-5 [featured]\n",
                "  Artificial Intelligence | Staff Writer | January 14, 2025 | 7 min read\n",
                "  Excerpt for OpenAI Releases GPT-5\n",
                "  /articles/openai-releases-gpt-5\n",
                "\n",
                "Page 1 of 2 (10 articles)\n",
            )
        );
    }

    #[test]
    fn empty_listing_says_so() {
        let page = Page::<Article>::new(Vec::new(), 1, PageSize::default(), 0);

        let output = render_listing(&page, &ListingFilter::default(), None).expect("render");

        assert_eq!(output, "No articles found.\nPage 1 of 1 (0 articles)\n");
    }

    #[rstest]
    fn custom_templates_see_the_query(gpt: Article) {
        let page = Page::new(vec![gpt], 1, PageSize::default(), 1);
        let filter = ListingFilter::default().with_category("Artificial Intelligence");

        let output = render_listing(
            &page,
            &filter,
            Some("{{ query }}|{% if active_filters %}filtered{% endif %}|{% for a in articles %}{{ a.tags | join(',') }}{% endfor %}"),
        )
        .expect("render");

        assert_eq!(
            output,
            "category=Artificial+Intelligence&sortBy=latest|filtered|AI,GPT-5"
        );
    }

    #[test]
    fn invalid_templates_are_configuration_errors() {
        let page = Page::<Article>::new(Vec::new(), 1, PageSize::default(), 0);

        let result = render_listing(&page, &ListingFilter::default(), Some("{% for %}"));

        assert!(matches!(result, Err(ApiError::Configuration { .. })));
    }

    #[rstest]
    fn article_body_is_sanitised_plain_text(gpt: Article) {
        let related = vec![article("5", "Claude ships", "Artificial Intelligence")];

        let output = render_article(&gpt, &related).expect("render");

        assert!(output.contains("Tags: AI, GPT-5\n"));
        assert!(output.contains("\nBig news.\n"));
        assert!(!output.contains("alert"));
        assert!(output.contains("- Claude ships (/articles/claude-ships)\n"));
    }

    #[test]
    fn categories_list_counts_and_links() {
        let output = render_categories(&[category("ai", "Artificial Intelligence", 4)])
            .expect("render");

        assert_eq!(
            output,
            "Artificial Intelligence (4) /categories/artificial-intelligence\n"
        );
    }

    #[rstest]
    fn write_listing_emits_the_rendering(gpt: Article) {
        let page = Page::new(vec![gpt], 1, PageSize::default(), 1);
        let mut buffer = Vec::new();

        write_listing(&mut buffer, &page, &ListingFilter::default(), None).expect("write");

        assert!(
            String::from_utf8(buffer)
                .expect("utf-8 output")
                .starts_with("OpenAI Releases GPT-5")
        );
    }
}
