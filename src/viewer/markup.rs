// src/viewer/markup.rs
use super::view::paragraphs;

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_paragraphs(text: &str) -> String {
    paragraphs(text)
        .into_iter()
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect()
}
