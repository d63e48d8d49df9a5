// src/viewer/layout.rs
use crate::story::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Horizontal,
    Vertical,
}

impl Layout {
    pub fn for_ratio(aspect_ratio: f64) -> Self {
        if aspect_ratio > 1.0 {
            Layout::Horizontal
        } else {
            Layout::Vertical
        }
    }

    pub fn for_page(page: &Page, default_ratio: f64) -> Self {
        Self::for_ratio(page.aspect_ratio().unwrap_or(default_ratio))
    }

    pub fn class(self) -> &'static str {
        match self {
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
        }
    }

    pub fn image_first(self) -> bool {
        self == Layout::Horizontal
    }
}
