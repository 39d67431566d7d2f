//! Markdown-backed content pages.
//!
//! Pages live in `content/pages/*.md` with YAML frontmatter and are rendered
//! to HTML once at startup. The file stem is the page slug, so
//! `quienes-somos.md` is served at `/quienes-somos`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use serde::Deserialize;

/// Frontmatter of a content page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Optional side image, relative to `/static`.
    #[serde(default)]
    pub image: Option<String>,
}

/// A rendered page with metadata and HTML content.
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// Content store that holds all loaded pages in memory.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
}

impl ContentStore {
    /// Load every page under `content_dir/pages`.
    ///
    /// A missing directory yields an empty store. Pages that fail to parse are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let dir = content_dir.join("pages");
        let mut pages = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(Self::default());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| ContentError::Io(e.to_string()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            match Self::load_page(&path) {
                Ok(page) => {
                    tracing::info!(slug = %page.slug, "Loaded page");
                    pages.insert(page.slug.clone(), page);
                }
                Err(e) => tracing::error!("Failed to load page {:?}: {}", path, e),
            }
        }

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    fn load_page(path: &Path) -> Result<Page, ContentError> {
        let source = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?;
        parse_page(slug, &source)
    }

    /// Build a store from in-memory `(slug, markdown)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if any page has missing or malformed frontmatter.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ContentError> {
        let pages = sources
            .into_iter()
            .map(|(slug, source)| parse_page(slug, source).map(|page| (page.slug.clone(), page)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    /// Get a page by slug.
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn parse_page(slug: &str, source: &str) -> Result<Page, ContentError> {
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<PageMeta> = matter
        .parse(source)
        .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
    let meta = parsed
        .data
        .ok_or_else(|| ContentError::Parse(format!("Missing frontmatter in {slug}")))?;

    Ok(Page {
        slug: slug.to_string(),
        meta,
        content_html: render_markdown(&parsed.content),
    })
}

/// Render markdown to HTML with the GFM extensions pages use.
///
/// Raw HTML is escaped: page content never needs it.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    markdown_to_html(content, &options)
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}
