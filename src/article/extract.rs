//! Readable text extraction from raw page markup.
//!
//! Heuristic and best effort:
//! 1. Ignore non-content elements (scripts, navigation, ads, forms, comments)
//! 2. Pick the main container from an ordered list of selectors, else `<body>`
//! 3. Keep paragraph-like blocks longer than `MIN_BLOCK_CHARS`
//! 4. Fall back to the container's flattened text when blocks are too short

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;

use crate::config;

const EXCLUDED: &str = "script, style, nav, header, footer, aside, iframe, noscript, svg, form, button, input, \
  [role=\"navigation\"], [role=\"banner\"], [role=\"complementary\"], \
  .nav, .menu, .sidebar, .footer, .header, .ad, .advertisement, .social, .share, .comment, .comments";

const CONTENT_CONTAINERS: [&str; 9] = [
  "article",
  "[role=\"main\"]",
  "main",
  ".post-content",
  ".article-content",
  ".entry-content",
  ".content",
  "#content",
  "body",
];

const BLOCKS: &str = "p, h1, h2, h3, h4, h5, h6, li, blockquote, td, th, figcaption";

struct Selectors {
  excluded: Selector,
  containers: Vec<Selector>,
  blocks: Selector,
  og_title: Selector,
  title: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
  excluded: parse(EXCLUDED),
  containers: CONTENT_CONTAINERS.iter().map(|css| parse(css)).collect(),
  blocks: parse(BLOCKS),
  og_title: parse("meta[property=\"og:title\"]"),
  title: parse("title"),
});

static EXTRA_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

fn parse(css: &str) -> Selector {
  Selector::parse(css).expect("valid selector")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedPage {
  pub title: String,
  pub content: String,
}

pub fn extract_content(html: &str) -> ExtractedPage {
  let document = Html::parse_document(html);
  let selectors = &*SELECTORS;

  let title = extract_title(&document, selectors);

  let Some(container) = find_container(&document, selectors) else {
    return ExtractedPage {
      title,
      content: String::new(),
    };
  };

  let blocks: Vec<String> = container
    .select(&selectors.blocks)
    .filter(|el| !is_excluded(*el, selectors))
    .map(|el| visible_text(el, selectors).trim().to_string())
    .filter(|text| text.chars().count() > config::MIN_BLOCK_CHARS)
    .collect();

  let mut content = blocks.join("\n\n");
  if content.chars().count() < config::MIN_BODY_CHARS {
    content = collapse_whitespace(&visible_text(container, selectors));
  }

  let content = EXTRA_BLANK_LINES.replace_all(&content, "\n\n").trim().to_string();
  ExtractedPage { title, content }
}

/// Open Graph title, else `<title>`, else empty
fn extract_title(document: &Html, selectors: &Selectors) -> String {
  let og_title = document
    .select(&selectors.og_title)
    .filter_map(|meta| meta.value().attr("content"))
    .map(str::trim)
    .find(|t| !t.is_empty());

  match og_title {
    Some(title) => title.to_string(),
    None => document
      .select(&selectors.title)
      .next()
      .map(|t| t.text().collect::<String>().trim().to_string())
      .unwrap_or_default(),
  }
}

fn find_container<'a>(document: &'a Html, selectors: &Selectors) -> Option<ElementRef<'a>> {
  selectors
    .containers
    .iter()
    .find_map(|sel| document.select(sel).find(|el| !is_excluded(*el, selectors)))
}

/// Whether the element or one of its ancestors is non-content
fn is_excluded(element: ElementRef<'_>, selectors: &Selectors) -> bool {
  selectors.excluded.matches(&element)
    || element
      .ancestors()
      .filter_map(ElementRef::wrap)
      .any(|ancestor| selectors.excluded.matches(&ancestor))
}

/// Text of an element, skipping non-content descendants
fn visible_text(element: ElementRef<'_>, selectors: &Selectors) -> String {
  let mut out = String::new();
  push_visible_text(element, selectors, &mut out);
  out
}

fn push_visible_text(element: ElementRef<'_>, selectors: &Selectors, out: &mut String) {
  for child in element.children() {
    match child.value() {
      Node::Text(text) => out.push_str(text),
      Node::Element(_) => {
        if let Some(child) = ElementRef::wrap(child) {
          if !selectors.excluded.matches(&child) {
            push_visible_text(child, selectors, out);
          }
        }
      }
      _ => {}
    }
  }
}

fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}
