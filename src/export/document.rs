// src/export/document.rs
use super::script::{bindings_script, viewer_script, PAGE_INDEX_ATTRIBUTE};
use crate::error::ExportError;
use crate::story::{Page, Story};
use crate::utils::absolute_src;
use crate::viewer::markup::{escape_html, render_paragraphs};
use crate::viewer::styles::BOOK_STYLES;
use std::fmt::Write;

const PAGES_PER_SPREAD: usize = 2;

fn render_thumbnail(page: &Page, index: usize) -> String {
    let heading = page.heading(index);
    match page.image_src() {
        Some(src) => format!(
            r#"<figure class="story-thumb" {}="{}"><img src="{}" alt="{}" loading="lazy"></figure>"#,
            PAGE_INDEX_ATTRIBUTE,
            index,
            escape_html(src),
            escape_html(&heading)
        ),
        None => format!(
            r#"<figure class="story-thumb missing" {}="{}"><figcaption>{}</figcaption></figure>"#,
            PAGE_INDEX_ATTRIBUTE,
            index,
            escape_html(page.missing_image_reason())
        ),
    }
}

/// Book body: spreads of pages, each thumbnail marked with its page index.
pub fn render_book(pages: &[Page]) -> String {
    let mut out = String::from(r#"<main class="story-book">"#);
    for (spread, chunk) in pages.chunks(PAGES_PER_SPREAD).enumerate() {
        out.push_str(r#"<section class="story-spread">"#);
        for (offset, page) in chunk.iter().enumerate() {
            let index = spread * PAGES_PER_SPREAD + offset;
            let _ = write!(
                out,
                r#"<div class="story-page">{}<h3>{}</h3>{}</div>"#,
                render_thumbnail(page, index),
                escape_html(&page.heading(index)),
                render_paragraphs(&page.text)
            );
        }
        out.push_str("</section>");
    }
    out.push_str("</main>");
    out
}

// The file is opened away from the deployment, so relative references are
// pinned to `asset_root`.
fn with_absolute_images(pages: &[Page], asset_root: &str) -> Vec<Page> {
    pages
        .iter()
        .cloned()
        .map(|mut page| {
            if let Some(src) = page.image_src().map(|src| absolute_src(asset_root, src)) {
                page.image = Some(src);
            }
            page
        })
        .collect()
}

/// A complete, self-contained HTML document for `story`. Opening it needs no
/// framework runtime: the book is static markup and the viewer is inlined.
pub fn render_story_document(story: &Story, asset_root: &str) -> Result<String, ExportError> {
    let pages = with_absolute_images(&story.pages, asset_root);
    let script = viewer_script(&story.viewer)?;
    let bindings = bindings_script(&pages, story.viewer.default_aspect_ratio)?;

    let byline = story
        .author
        .as_deref()
        .map(|author| format!(r#"<p class="story-author">{}</p>"#, escape_html(author)))
        .unwrap_or_default();

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{styles}</style>
</head>
<body>
<header class="story-header"><h1>{title}</h1>{byline}</header>
{book}
<script>
{bindings}</script>
<script>
{script}</script>
</body>
</html>
"#,
        title = escape_html(&story.title),
        styles = BOOK_STYLES,
        byline = byline,
        book = render_book(&pages),
        bindings = bindings,
        script = script,
    ))
}
