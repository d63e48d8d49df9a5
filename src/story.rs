// src/story.rs
use crate::viewer::config::ViewerConfig;
use serde::{Deserialize, Serialize};

/// One page of an illustrated story. The page index is its position in
/// [`Story::pages`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "content")]
    pub text: String,
    /// Remote URL or `data:` URI of the generated artwork.
    #[serde(default, alias = "imageSrc")]
    pub image: Option<String>,
    /// Width / height of the page's own artwork.
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    /// Prompt the artwork was (or will be) generated from.
    #[serde(default)]
    pub image_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

pub const MISSING_IMAGE_TEXT: &str = "No image has been generated for this page yet.";

impl Page {
    /// Title to display, `None` when absent or blank.
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    /// Heading shown in the viewer, e.g. `"2. The Fox"`.
    pub fn heading(&self, index: usize) -> String {
        let number = index + 1;
        match self.display_title() {
            Some(title) => format!("{}. {}", number, title),
            None => format!("{}. Page {}", number, number),
        }
    }

    pub fn image_src(&self) -> Option<&str> {
        self.image
            .as_deref()
            .map(str::trim)
            .filter(|src| !src.is_empty())
    }

    /// The page's own aspect ratio, ignoring non-finite or non-positive values.
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.aspect_ratio
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
    }

    /// Text for the "no image" placeholder.
    pub fn missing_image_reason(&self) -> &str {
        self.image_prompt
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
            .unwrap_or(MISSING_IMAGE_TEXT)
    }
}

impl Story {
    pub fn get_page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn manifest_path(id: &str) -> String {
        format!("public/stories/{}.json", id)
    }

    pub fn export_file_name(&self) -> String {
        let slug: String = self
            .id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
            .collect();
        format!("{}.html", slug)
    }
}

#[cfg(test)]
impl Page {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_image(mut self, src: impl Into<String>) -> Self {
        self.image = Some(src.into());
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.image_prompt = Some(prompt.into());
        self
    }
}

#[cfg(test)]
impl Story {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            author: None,
            pages: Vec::new(),
            viewer: ViewerConfig::default(),
        }
    }
}
