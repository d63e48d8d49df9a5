// src/viewer/view.rs
use super::layout::Layout;
use crate::story::Page;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSlot {
    Ready { src: String, cached: bool },
    Missing { reason: String },
}

// Text is raw here; escaping belongs to whoever renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub index: usize,
    pub total: usize,
    pub heading: String,
    pub text: String,
    pub image: ImageSlot,
    pub layout: Layout,
    pub has_previous: bool,
    pub has_next: bool,
    pub ui_visible: bool,
}

impl PageView {
    pub fn describe(
        pages: &[Page],
        index: usize,
        default_aspect_ratio: f64,
        ui_visible: bool,
        is_cached: impl Fn(&str) -> bool,
    ) -> Option<Self> {
        let page = pages.get(index)?;
        let image = match page.image_src() {
            Some(src) => ImageSlot::Ready {
                src: src.to_string(),
                cached: is_cached(src),
            },
            None => ImageSlot::Missing {
                reason: page.missing_image_reason().to_string(),
            },
        };

        Some(Self {
            index,
            total: pages.len(),
            heading: page.heading(index),
            text: page.text.clone(),
            image,
            layout: Layout::for_page(page, default_aspect_ratio),
            has_previous: index > 0,
            has_next: index + 1 < pages.len(),
            ui_visible,
        })
    }

    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.total)
    }

    pub fn paragraphs(&self) -> Vec<&str> {
        paragraphs(&self.text)
    }
}

pub fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
